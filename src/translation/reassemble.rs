/*!
 * Order-preserving reassembly of batch results.
 *
 * Batch results arrive in completion order. They are scattered into a
 * fixed-size arena indexed by unique-fragment position, then gathered back
 * onto the original positions through the deduplication slots. Batches cover
 * disjoint ranges, so every arena slot is written at most once.
 */

use log::warn;

use super::batch::TranslationResult;
use super::dedup::{Slot, UniqueTextTable};

/// Write-once result slots, one per unique fragment
#[derive(Debug, Clone)]
pub struct ResultArena {
    slots: Vec<Option<String>>,
    filled: usize,
}

impl ResultArena {
    /// Create an arena with `len` empty slots
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            filled: 0,
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots written so far
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Translated value for a unique index, if its batch completed
    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    /// Write a batch result at its recorded offset
    pub fn scatter(&mut self, result: TranslationResult) {
        let start = result.start;
        for (offset, text) in result.texts.into_iter().enumerate() {
            let index = start + offset;
            match self.slots.get_mut(index) {
                Some(slot) => {
                    if slot.is_none() {
                        self.filled += 1;
                    }
                    *slot = Some(text);
                }
                None => {
                    warn!("Dropping result for out-of-range slot {} (arena size {})", index, self.slots.len());
                }
            }
        }
    }

    /// Map unique results back onto the original positions
    ///
    /// Blank fragments and any slot that never received a result fall back to
    /// the original text at that position.
    pub fn gather(&self, table: &UniqueTextTable, originals: &[String]) -> Vec<String> {
        table
            .slots()
            .iter()
            .zip(originals)
            .map(|(slot, original)| match slot {
                Slot::Unique(index) => self
                    .get(*index)
                    .map(str::to_string)
                    .unwrap_or_else(|| original.clone()),
                Slot::Passthrough => original.clone(),
            })
            .collect()
    }
}
