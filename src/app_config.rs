use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language tag (e.g. "zh-CN", "fr")
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Bulk machine translation service
    #[serde(alias = "google")]
    Bulk,
    // @provider: Conversational LLM (OpenAI-compatible chat completions)
    #[default]
    #[serde(alias = "deepseek")]
    Llm,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Bulk => "Bulk MT",
            Self::Llm => "LLM",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Bulk => "bulk".to_string(),
            Self::Llm => "llm".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bulk" | "google" => Ok(Self::Bulk),
            "llm" | "deepseek" => Ok(Self::Llm),
            _ => Err(ConfigError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Bulk machine translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BulkConfig {
    /// Service endpoint URL
    #[serde(default = "default_bulk_endpoint")]
    pub endpoint: String,

    /// Source language passed to the service ("auto" lets it detect)
    #[serde(default = "default_bulk_source_language")]
    pub source_language: String,

    /// Request timeout in seconds
    #[serde(default = "default_bulk_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            endpoint: default_bulk_endpoint(),
            source_language: default_bulk_source_language(),
            timeout_secs: default_bulk_timeout_secs(),
        }
    }
}

/// Conversational LLM service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    /// Service endpoint URL (OpenAI-compatible)
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// Model name (e.g., "deepseek-chat")
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API key for the service; falls back to the DEEPSEEK_API_KEY environment variable
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Temperature for batch, document and summary requests
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Temperature for title and chapter requests
    #[serde(default = "default_title_temperature")]
    pub title_temperature: f32,

    /// Timeout for a single batch request in seconds
    #[serde(default = "default_batch_timeout_secs")]
    pub batch_timeout_secs: u64,

    /// Timeout for whole-document requests (segmentation, summary) in seconds
    #[serde(default = "default_document_timeout_secs")]
    pub document_timeout_secs: u64,

    /// Timeout for title translation in seconds
    #[serde(default = "default_title_timeout_secs")]
    pub title_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: String::new(),
            temperature: default_temperature(),
            title_temperature: default_title_temperature(),
            batch_timeout_secs: default_batch_timeout_secs(),
            document_timeout_secs: default_document_timeout_secs(),
            title_timeout_secs: default_title_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Get the API key from the config, or from the environment when the config leaves it empty
    pub fn resolved_api_key(&self) -> String {
        if !self.api_key.trim().is_empty() {
            return self.api_key.trim().to_string();
        }
        std::env::var(API_KEY_ENV).unwrap_or_default().trim().to_string()
    }
}

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Translation pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Number of unique fragments per backend request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Additional attempts after the first failure of a request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay before each retry, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Maximum number of batch requests in flight
    #[serde(default = "default_concurrent_workers")]
    pub concurrent_workers: usize,

    /// Translate each distinct fragment once and reuse the result for duplicates
    #[serde(default = "default_true")]
    pub deduplicate: bool,

    /// Also translate every cue individually (in addition to the paragraph view)
    #[serde(default)]
    pub translate_cues: bool,

    /// Bulk machine translation settings
    #[serde(default)]
    pub bulk: BulkConfig,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            batch_size: default_batch_size(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            concurrent_workers: default_concurrent_workers(),
            deduplicate: true,
            translate_cues: false,
            bulk: BulkConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl TranslationConfig {
    /// Batch size, never below one
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    /// Worker count, never below one
    pub fn effective_workers(&self) -> usize {
        self.concurrent_workers.max(1)
    }

    /// Validate the provider-specific settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.concurrent_workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrent_workers".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        match self.provider {
            TranslationProvider::Llm => {
                if self.llm.resolved_api_key().is_empty() {
                    return Err(ConfigError::MissingApiKey {
                        provider: self.provider.to_lowercase_string(),
                    });
                }
                if self.llm.model.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "llm.model".to_string(),
                        reason: "must not be empty".to_string(),
                    });
                }
                if !(0.0..=2.0).contains(&self.llm.temperature) {
                    return Err(ConfigError::InvalidValue {
                        field: "llm.temperature".to_string(),
                        reason: format!("{} is outside 0.0..=2.0", self.llm.temperature),
                    });
                }
                url::Url::parse(&self.llm.endpoint).map_err(|e| ConfigError::InvalidValue {
                    field: "llm.endpoint".to_string(),
                    reason: e.to_string(),
                })?;
            }
            TranslationProvider::Bulk => {
                url::Url::parse(&self.bulk.endpoint).map_err(|e| ConfigError::InvalidValue {
                    field: "bulk.endpoint".to_string(),
                    reason: e.to_string(),
                })?;
            }
        }

        Ok(())
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate's filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "zh-CN".to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_concurrent_workers() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_bulk_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_bulk_source_language() -> String {
    "auto".to_string()
}

fn default_bulk_timeout_secs() -> u64 {
    30
}

fn default_llm_endpoint() -> String {
    "https://api.deepseek.com".to_string()
}

fn default_llm_model() -> String {
    "deepseek-chat".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_title_temperature() -> f32 {
    0.1
}

fn default_batch_timeout_secs() -> u64 {
    60
}

fn default_document_timeout_secs() -> u64 {
    120
}

fn default_title_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::language_utils::validate_language_tag(&self.target_language)?;
        self.translation.validate()
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
