/*!
 * # ytsubtrans - bilingual subtitle translation
 *
 * A Rust library that turns a video transcript into a bilingual report:
 * translated cues, re-paragraphed full text on a synthetic timeline, a
 * summary, and translated title and chapters.
 *
 * ## Features
 *
 * - Deduplicated, batched, concurrent fragment translation with retries
 * - Two backends:
 *   - Bulk machine translation (Google Translate web endpoint)
 *   - Conversational LLM (OpenAI-compatible chat completions, DeepSeek by default)
 * - Order- and length-preserving results, with source-text fallback on failure
 * - Whole-document translation with semantic paragraphing
 * - Proportional timeline redistribution for translated paragraphs
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `transcript`: Data exchanged with acquisition and rendering layers
 * - `translation`: The translation pipeline:
 *   - `translation::core`: `TranslationService` and its public operations
 *   - `translation::dispatch`: Concurrent batch dispatch
 *   - `translation::timeline`: Timeline redistribution
 * - `providers`: HTTP clients for the remote services
 * - `app_controller`: Transcript to report orchestration
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod transcript;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ConfigError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, validate_language_tag};
pub use transcript::{BilingualReport, Chapter, Cue, TimedParagraph, TranscriptInput};
pub use translation::{BatchTranslator, TranslationService};
