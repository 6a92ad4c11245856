use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::transcript::{BilingualReport, ReportStats, TranscriptInput};
use crate::translation::{TranslationService, redistribute};

// @module: Application controller for transcript translation

/// Main application controller: one transcript in, one bilingual report out
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default report path: `<input stem>.<target language>.json` next to the input
    pub fn default_output_path(input_file: &Path, target_language: &str) -> PathBuf {
        let stem = input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "transcript".to_string());
        input_file.with_file_name(format!("{}.{}.json", stem, target_language))
    }

    /// Read a transcript JSON file
    pub fn read_transcript(path: &Path) -> Result<TranscriptInput, AppError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::file("Failed to read transcript", path, e))?;
        serde_json::from_str(&content).map_err(|e| AppError::json("Failed to parse transcript", path, e))
    }

    /// Write a report as pretty-printed JSON, creating parent directories as needed
    pub fn write_report(path: &Path, report: &BilingualReport) -> Result<(), AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::file("Failed to create output directory", parent, e))?;
        }
        let json = serde_json::to_string_pretty(report).map_err(|e| AppError::json("Failed to serialize report for", path, e))?;
        std::fs::write(path, json).map_err(|e| AppError::file("Failed to write report", path, e))
    }

    /// Run the main workflow: read the transcript, translate it and write the report
    pub async fn run(&self, input_file: PathBuf, output_file: Option<PathBuf>, force_overwrite: bool) -> Result<PathBuf> {
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        let output_path =
            output_file.unwrap_or_else(|| Self::default_output_path(&input_file, &self.config.target_language));
        if output_path.exists() && !force_overwrite {
            warn!("Skipping, report already exists (use -f to force overwrite): {:?}", output_path);
            return Ok(output_path);
        }

        let transcript = Self::read_transcript(&input_file)?;
        info!(
            "Loaded {} cue(s) for video '{}' ({})",
            transcript.cues.len(),
            transcript.video_id,
            if transcript.source_language.is_empty() { "unknown language" } else { transcript.source_language.as_str() }
        );

        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} fragments ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let pb = progress_bar.clone();
        let service = TranslationService::new(&self.config)
            .map_err(AppError::from)
            .context("Failed to create translation service")?
            .with_progress(Arc::new(move |done, total| {
                pb.set_length(total as u64);
                pb.set_position(done as u64);
            }));

        info!(
            "ytsubtrans: {} -> {}",
            self.config.translation.provider.display_name(),
            self.config.target_language
        );
        let report = self.process(&service, transcript, &progress_bar).await;
        progress_bar.finish_and_clear();

        Self::write_report(&output_path, &report)?;
        info!(
            "Report written to {:?} ({} paragraph(s), {:.1}s)",
            output_path, report.stats.paragraph_count, report.stats.processing_secs
        );
        Ok(output_path)
    }

    /// Translate one transcript into a report with the given service
    ///
    /// Never fails: every translation step degrades to source text or a
    /// fixed message on backend failure.
    pub async fn process(
        &self,
        service: &TranslationService,
        transcript: TranscriptInput,
        progress_bar: &ProgressBar,
    ) -> BilingualReport {
        let start_time = Instant::now();
        let full_text = transcript.full_text();
        let (total_start, total_end) = transcript.time_span();
        let TranscriptInput {
            video_id,
            mut cues,
            source_language,
            title,
            chapters,
        } = transcript;

        progress_bar.set_message("Translating full text");
        let paragraphs = service.translate_full_and_split(&full_text).await;

        progress_bar.set_message("Summarizing");
        let summary = service.generate_summary(&full_text).await;

        progress_bar.set_message("Translating title");
        let title_translated = match &title {
            Some(title) => service.translate_title(title).await,
            None => String::new(),
        };

        let chapters = if chapters.is_empty() {
            chapters
        } else {
            progress_bar.set_message("Translating chapters");
            service.translate_chapters(chapters).await
        };

        if self.config.translation.translate_cues && !cues.is_empty() {
            progress_bar.set_message("Translating cues");
            let translated = service.translate_items(&cues).await;
            for (cue, text) in cues.iter_mut().zip(translated) {
                cue.translated_text = text;
            }
        }

        let timed = redistribute(total_start, total_end, &paragraphs);

        let stats = ReportStats {
            source_language,
            target_language: service.target_language().to_string(),
            provider: service.backend_name().to_string(),
            cue_count: cues.len(),
            paragraph_count: timed.len(),
            full_text_length: full_text.chars().count(),
            processing_secs: start_time.elapsed().as_secs_f64(),
        };

        BilingualReport {
            video_id,
            title,
            title_translated,
            cues,
            paragraphs: timed,
            chapters,
            summary,
            full_text,
            stats,
        }
    }
}
