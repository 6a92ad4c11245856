/*!
 * Fragment deduplication.
 *
 * Collapses an ordered list of fragments into the distinct strings that need
 * translating, plus a per-position map used to put results back in order.
 * Equality is exact string equality. Blank fragments (empty or whitespace
 * only) never reach a backend: they are mapped to `Slot::Passthrough` and
 * come back unchanged.
 */

use std::collections::HashMap;

// A whitespace-only line cannot survive the one-line-per-fragment LLM reply
// (it is trimmed or dropped), so blank fragments are never sent anywhere.
fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Where the translation for one original position comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Index into the unique sequence
    Unique(usize),
    /// Blank fragment, returned as-is
    Passthrough,
}

/// Deduplication result
#[derive(Debug, Clone, Default)]
pub struct UniqueTextTable {
    /// Distinct non-blank fragments in first-occurrence order
    unique: Vec<String>,
    /// One slot per original position
    slots: Vec<Slot>,
}

impl UniqueTextTable {
    /// Build a table where each distinct fragment appears once
    pub fn build(texts: &[String]) -> Self {
        let mut unique: Vec<String> = Vec::new();
        let mut slots = Vec::with_capacity(texts.len());
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for text in texts {
            if is_blank(text) {
                slots.push(Slot::Passthrough);
                continue;
            }
            let index = *seen.entry(text.as_str()).or_insert_with(|| {
                unique.push(text.clone());
                unique.len() - 1
            });
            slots.push(Slot::Unique(index));
        }

        Self { unique, slots }
    }

    /// Build a table without merging duplicates, for non-deterministic backends
    pub fn build_without_dedup(texts: &[String]) -> Self {
        let mut unique = Vec::new();
        let slots = texts
            .iter()
            .map(|text| {
                if is_blank(text) {
                    Slot::Passthrough
                } else {
                    unique.push(text.clone());
                    Slot::Unique(unique.len() - 1)
                }
            })
            .collect();

        Self { unique, slots }
    }

    /// Distinct fragments to translate
    pub fn unique(&self) -> &[String] {
        &self.unique
    }

    /// Per-position slots, same length as the input
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of original positions
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the input was empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
