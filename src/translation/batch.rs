/*!
 * Batch planning.
 *
 * Splits the unique fragment sequence into contiguous chunks of at most
 * `batch_size` strings. Each batch remembers its start offset so results can
 * be scattered back without relying on completion order.
 */

/// A contiguous slice of unique fragments dispatched together
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Index of the first fragment in the unique sequence
    pub start: usize,
    /// Fragments in this batch
    pub texts: Vec<String>,
}

impl Batch {
    /// Number of fragments in the batch
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the batch holds no fragments
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Translated strings for one batch, aligned with its source fragments
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    /// Start offset copied from the batch
    pub start: usize,
    /// Exactly one string per source fragment
    pub texts: Vec<String>,
    /// True when the batch fell back to its source text
    pub fallback: bool,
}

/// Partition `unique` into batches of at most `batch_size` (clamped to 1)
pub fn plan_batches(unique: &[String], batch_size: usize) -> Vec<Batch> {
    let batch_size = batch_size.max(1);
    unique
        .chunks(batch_size)
        .enumerate()
        .map(|(i, chunk)| Batch {
            start: i * batch_size,
            texts: chunk.to_vec(),
        })
        .collect()
}
