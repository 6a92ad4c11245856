/*!
 * Core translation service implementation.
 *
 * `TranslationService` owns the selected backend and exposes the public
 * operations used by the controller: fragment-list translation (deduplicated,
 * batched, dispatched concurrently and reassembled in order), whole-document
 * translation with re-paragraphing, summaries, titles and chapter headings.
 *
 * Backend failures never escape these operations. Each one degrades to a
 * source-text fallback or a fixed message after the retry policy gives up;
 * only configuration problems surface as errors, from `new`.
 */

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{Config, TranslationConfig, TranslationProvider};
use crate::errors::TranslationError;
use crate::providers::google::GoogleTranslate;
use crate::providers::openai::OpenAI;
use crate::transcript::{Chapter, Cue};

use super::backend::{BatchTranslator, BulkTranslator, LlmSettings, LlmTranslator};
use super::batch::plan_batches;
use super::dedup::UniqueTextTable;
use super::dispatch::{DispatchStats, Dispatcher, ProgressCallback};
use super::reassemble::ResultArena;
use super::retry::RetryPolicy;
use super::segmentation::{parse_paragraphs, rough_split};

/// Summary returned for an empty document
pub const NO_CONTENT_SUMMARY: &str = "No content available to summarize.";

/// Summary returned when the backend has no summarization capability
pub const BULK_SUMMARY_NOTICE: &str =
    "Summary is not available with the bulk translation provider. Switch to the llm provider to generate one.";

/// Prefix of the summary returned when every attempt failed
pub const SUMMARY_FAILED_PREFIX: &str = "Summary generation failed";

/// Pipeline knobs derived from the translation config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationOptions {
    /// Unique fragments per backend request
    pub batch_size: usize,

    /// Maximum backend requests in flight
    pub workers: usize,

    /// Retry policy for every backend call
    pub retry: RetryPolicy,

    /// Translate duplicates once
    pub deduplicate: bool,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self::from_config(&TranslationConfig::default())
    }
}

impl TranslationOptions {
    /// Derive options from the translation config, clamping sizes to at least one
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            batch_size: config.effective_batch_size(),
            workers: config.effective_workers(),
            retry: RetryPolicy::new(config.max_retries, Duration::from_millis(config.retry_delay_ms)),
            deduplicate: config.deduplicate,
        }
    }
}

/// Translations plus what it took to produce them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextTranslation {
    /// One translation per input position
    pub texts: Vec<String>,

    /// Number of fragments actually sent to the backend
    pub unique_count: usize,

    /// Dispatch counters, including fallbacks
    pub stats: DispatchStats,
}

impl TextTranslation {
    /// Whether any position kept its source text because its batch failed
    pub fn has_fallback(&self) -> bool {
        self.stats.fallback_batches > 0
    }
}

/// Main translation service
pub struct TranslationService {
    backend: Arc<dyn BatchTranslator>,
    target_language: String,
    options: TranslationOptions,
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("backend", &self.backend)
            .field("target_language", &self.target_language)
            .field("options", &self.options)
            .finish()
    }
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    ///
    /// The configuration is validated first; a missing credential or an
    /// unusable value fails here, before any request is made.
    pub fn new(config: &Config) -> Result<Self, TranslationError> {
        config.validate()?;
        let translation = &config.translation;

        let backend: Arc<dyn BatchTranslator> = match translation.provider {
            TranslationProvider::Bulk => {
                let client = GoogleTranslate::new(
                    translation.bulk.endpoint.as_str(),
                    Duration::from_secs(translation.bulk.timeout_secs),
                );
                Arc::new(BulkTranslator::new(client, translation.bulk.source_language.as_str()))
            }
            TranslationProvider::Llm => {
                let llm = &translation.llm;
                let client = OpenAI::new(llm.resolved_api_key(), llm.endpoint.as_str());
                let settings = LlmSettings {
                    model: llm.model.clone(),
                    temperature: llm.temperature,
                    title_temperature: llm.title_temperature,
                    batch_timeout: Duration::from_secs(llm.batch_timeout_secs),
                    document_timeout: Duration::from_secs(llm.document_timeout_secs),
                    title_timeout: Duration::from_secs(llm.title_timeout_secs),
                };
                Arc::new(LlmTranslator::new(client, settings))
            }
        };

        info!(
            "Translation service ready: provider={}, target={}, batch_size={}, workers={}",
            translation.provider,
            config.target_language,
            translation.effective_batch_size(),
            translation.effective_workers()
        );

        Ok(Self::with_backend(
            backend,
            config.target_language.as_str(),
            TranslationOptions::from_config(translation),
        ))
    }

    /// Create a service over an already-built backend
    pub fn with_backend(
        backend: Arc<dyn BatchTranslator>,
        target_language: impl Into<String>,
        options: TranslationOptions,
    ) -> Self {
        Self {
            backend,
            target_language: target_language.into(),
            options,
            progress: None,
        }
    }

    /// Report `(done, total)` unique fragments after every completed batch
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Target language tag
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Options in use
    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    /// Translate a list of fragments, preserving order and length
    pub async fn translate_texts(&self, texts: &[String]) -> Vec<String> {
        self.translate_texts_with_report(texts).await.texts
    }

    /// Translate a list of fragments and report which batches fell back
    pub async fn translate_texts_with_report(&self, texts: &[String]) -> TextTranslation {
        if texts.is_empty() {
            return TextTranslation::default();
        }

        let table = if self.options.deduplicate {
            UniqueTextTable::build(texts)
        } else {
            UniqueTextTable::build_without_dedup(texts)
        };
        let batches = plan_batches(table.unique(), self.options.batch_size);
        debug!(
            "Translating {} fragment(s): {} unique, {} batch(es) of up to {}",
            texts.len(),
            table.unique().len(),
            batches.len(),
            self.options.batch_size
        );

        let start_time = Instant::now();
        let mut arena = ResultArena::new(table.unique().len());
        let stats = Dispatcher::new(Arc::clone(&self.backend), self.options.retry, self.options.workers)
            .with_progress(self.progress.clone())
            .dispatch(&batches, &self.target_language, &mut arena)
            .await;

        if stats.fallback_batches > 0 {
            warn!(
                "{} of {} batch(es) kept their source text ({} fragment(s))",
                stats.fallback_batches, stats.batches, stats.fallback_fragments
            );
        }
        info!(
            "Translated {} fragment(s) in {:.1}s",
            texts.len(),
            start_time.elapsed().as_secs_f64()
        );

        TextTranslation {
            texts: arena.gather(&table, texts),
            unique_count: table.unique().len(),
            stats,
        }
    }

    /// Translate the text of every cue, one result per cue
    pub async fn translate_items(&self, cues: &[Cue]) -> Vec<String> {
        let texts: Vec<String> = cues.iter().map(|cue| cue.text.clone()).collect();
        self.translate_texts(&texts).await
    }

    /// Translate a whole document and split it into target-language paragraphs
    ///
    /// Backends with document support translate and re-paragraph in one
    /// request; if that keeps failing the untranslated document comes back as
    /// a single paragraph. Other backends get a local sentence split followed
    /// by ordinary batch translation.
    pub async fn translate_full_and_split(&self, document: &str) -> Vec<String> {
        let document = document.trim();
        if document.is_empty() {
            return Vec::new();
        }

        if !self.backend.supports_documents() {
            let pieces = rough_split(document);
            debug!("Split document locally into {} piece(s)", pieces.len());
            return self.translate_texts(&pieces).await;
        }

        let outcome = self
            .options
            .retry
            .run("Full-text translation", || {
                self.backend.translate_document(document, &self.target_language)
            })
            .await;

        match outcome {
            Ok(answer) => {
                let paragraphs = parse_paragraphs(&answer);
                if paragraphs.is_empty() {
                    warn!("Full-text translation produced no paragraphs, keeping source document");
                    return vec![document.to_string()];
                }
                info!("Full-text translation produced {} paragraph(s)", paragraphs.len());
                paragraphs
            }
            Err(e) => {
                warn!("Full-text translation failed, keeping source document: {}", e);
                vec![document.to_string()]
            }
        }
    }

    /// Summarize a document in the target language
    ///
    /// Always returns displayable text: a fixed message stands in when there
    /// is nothing to summarize, the backend cannot summarize, or it keeps failing.
    pub async fn generate_summary(&self, document: &str) -> String {
        let document = document.trim();
        if document.is_empty() {
            return NO_CONTENT_SUMMARY.to_string();
        }
        if !self.backend.supports_documents() {
            return BULK_SUMMARY_NOTICE.to_string();
        }

        let outcome = self
            .options
            .retry
            .run("Summary", || self.backend.summarize(document, &self.target_language))
            .await;

        match outcome {
            Ok(summary) => summary.trim().to_string(),
            Err(e) => format!("{}: {}", SUMMARY_FAILED_PREFIX, e),
        }
    }

    /// Translate a video title, falling back to the source title
    pub async fn translate_title(&self, title: &str) -> String {
        let title = title.trim();
        if title.is_empty() {
            return String::new();
        }

        let outcome = self
            .options
            .retry
            .run("Title translation", || {
                self.backend.translate_title(title, &self.target_language)
            })
            .await;

        match outcome {
            Ok(translated) if !translated.trim().is_empty() => translated.trim().to_string(),
            Ok(_) => title.to_string(),
            Err(e) => {
                warn!("Title translation failed, keeping source title: {}", e);
                title.to_string()
            }
        }
    }

    /// Attach a translated title to every chapter, in order
    ///
    /// Chapters whose heading could not be translated carry their source
    /// title as the translation. Extra chapter fields are left untouched.
    pub async fn translate_chapters(&self, mut chapters: Vec<Chapter>) -> Vec<Chapter> {
        if chapters.is_empty() {
            return chapters;
        }
        let titles: Vec<String> = chapters.iter().map(|c| c.title.clone()).collect();

        let translated = if self.backend.supports_documents() {
            self.translate_headings(&titles).await
        } else {
            self.translate_texts(&titles).await
        };

        for (chapter, title) in chapters.iter_mut().zip(translated) {
            chapter.translated_title = Some(title);
        }
        chapters
    }

    /// One-request heading translation matched to titles by index
    async fn translate_headings(&self, titles: &[String]) -> Vec<String> {
        let outcome = self
            .options
            .retry
            .run("Chapter translation", || {
                self.backend.translate_headings(titles, &self.target_language)
            })
            .await;

        let lines = match outcome {
            Ok(lines) => lines,
            Err(e) => {
                warn!("Chapter translation failed, keeping source titles: {}", e);
                return titles.to_vec();
            }
        };
        if lines.len() != titles.len() {
            warn!(
                "Chapter translation returned {} line(s) for {} chapter(s)",
                lines.len(),
                titles.len()
            );
        }

        titles
            .iter()
            .enumerate()
            .map(|(i, title)| match lines.get(i) {
                Some(line) if !line.trim().is_empty() => line.trim().to_string(),
                _ => title.clone(),
            })
            .collect()
    }
}
