/*!
 * Batch translation pipeline for subtitle fragments.
 *
 * Submodules, leaf-first:
 *
 * - `dedup`: collapse duplicate fragments into a unique table
 * - `batch`: partition unique fragments into fixed-size batches
 * - `backend`: the `BatchTranslator` capability and its bulk/LLM backends
 * - `prompts`: prompt templates for the LLM backend
 * - `formatting`: answer cleanup and count normalization
 * - `retry`: fixed-delay retry policy
 * - `dispatch`: bounded-concurrency batch dispatch with fallback
 * - `reassemble`: order-preserving result reassembly
 * - `segmentation`: paragraph parsing and local sentence splitting
 * - `timeline`: proportional time spans for translated paragraphs
 * - `core`: `TranslationService`, the public operations
 */

// Re-export main types for easier usage
pub use self::backend::{BatchTranslator, BulkTranslator, LlmSettings, LlmTranslator};
pub use self::core::{TextTranslation, TranslationOptions, TranslationService};
pub use self::dispatch::{DispatchStats, ProgressCallback};
pub use self::retry::RetryPolicy;
pub use self::timeline::redistribute;

// Submodules
pub mod backend;
pub mod batch;
pub mod core;
pub mod dedup;
pub mod dispatch;
pub mod formatting;
pub mod prompts;
pub mod reassemble;
pub mod retry;
pub mod segmentation;
pub mod timeline;
