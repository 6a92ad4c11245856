/*!
 * Concurrent batch dispatch.
 *
 * Runs one backend call per batch with at most `workers` calls in flight,
 * retries failed batches under the `RetryPolicy`, and substitutes the source
 * text for any batch whose retries are exhausted. Completed results are
 * consumed by a single collector loop that scatters them into the
 * `ResultArena`, so no locking is needed around the results.
 */

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

use super::backend::BatchTranslator;
use super::batch::{Batch, TranslationResult};
use super::formatting::normalize_count;
use super::reassemble::ResultArena;
use super::retry::RetryPolicy;

/// Progress callback: (unique fragments done, unique fragments total)
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Outcome counters for one dispatch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Batches dispatched
    pub batches: usize,
    /// Batches that fell back to source text
    pub fallback_batches: usize,
    /// Fragments that fell back to source text
    pub fallback_fragments: usize,
}

/// Bounded-concurrency batch runner
pub struct Dispatcher {
    backend: Arc<dyn BatchTranslator>,
    retry: RetryPolicy,
    workers: usize,
    progress: Option<ProgressCallback>,
}

impl Dispatcher {
    /// Create a dispatcher; `workers` is clamped to at least one
    pub fn new(backend: Arc<dyn BatchTranslator>, retry: RetryPolicy, workers: usize) -> Self {
        Self {
            backend,
            retry,
            workers: workers.max(1),
            progress: None,
        }
    }

    /// Report progress after every completed batch
    pub fn with_progress(mut self, progress: Option<ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// Translate every batch and scatter the results into `arena`
    pub async fn dispatch(&self, batches: &[Batch], target_language: &str, arena: &mut ResultArena) -> DispatchStats {
        let mut stats = DispatchStats {
            batches: batches.len(),
            ..Default::default()
        };
        if batches.is_empty() {
            return stats;
        }

        let total_batches = batches.len();
        let total = arena.len();
        let mut completed = stream::iter(batches.iter().enumerate())
            .map(|(index, batch)| self.run_batch(index, total_batches, batch, target_language))
            .buffer_unordered(self.workers);

        while let Some(result) = completed.next().await {
            if result.fallback {
                stats.fallback_batches += 1;
                stats.fallback_fragments += result.texts.len();
            }
            arena.scatter(result);

            let done = arena.filled();
            debug!(
                "Translation progress {}/{} ({}%)",
                done,
                total,
                done * 100 / total.max(1)
            );
            if let Some(progress) = &self.progress {
                progress(done, total);
            }
        }

        stats
    }

    /// Translate one batch with retries; never fails
    async fn run_batch(&self, index: usize, total: usize, batch: &Batch, target_language: &str) -> TranslationResult {
        let label = format!("Batch {}/{} ({} via {})", index + 1, total, batch.len(), self.backend.name());
        let start_time = Instant::now();

        let outcome = self
            .retry
            .run(&label, || self.backend.translate_batch(&batch.texts, target_language))
            .await;

        match outcome {
            Ok(output) => {
                let received = output.len();
                let texts = normalize_count(output, &batch.texts);
                if received != batch.len() {
                    warn!(
                        "{} returned {} item(s) for {}; normalized to source length",
                        label,
                        received,
                        batch.len()
                    );
                }
                debug!("{} completed in {:?}", label, start_time.elapsed());
                TranslationResult {
                    start: batch.start,
                    texts,
                    fallback: false,
                }
            }
            Err(e) => {
                warn!("{} exhausted retries, keeping source text: {}", label, e);
                TranslationResult {
                    start: batch.start,
                    texts: batch.texts.clone(),
                    fallback: true,
                }
            }
        }
    }
}
