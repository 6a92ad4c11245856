/*!
 * Error types for the ytsubtrans application.
 *
 * Backend failures (`ProviderError`) are always contained by the translation
 * pipeline and degrade to pass-through output. Configuration failures
 * (`ConfigError`) are raised when a `TranslationService` is constructed,
 * before any batch work starts. `AppError` covers transcript and report
 * file handling in the controller.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The request did not complete within its deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The backend answered but produced no usable text
    #[error("Empty response from {0}")]
    EmptyResponse(String),

    /// The backend does not offer the requested capability
    #[error("Operation not supported by backend: {0}")]
    Unsupported(String),
}

impl ProviderError {
    /// Map a transport-level reqwest error onto the provider taxonomy
    pub fn from_reqwest(backend: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(format!("{}: {}", backend, error))
        } else if error.is_connect() {
            Self::ConnectionError(format!("{}: {}", backend, error))
        } else if error.is_decode() {
            Self::ParseError(format!("{}: {}", backend, error))
        } else {
            Self::RequestFailed(format!("{}: {}", backend, error))
        }
    }

    /// Map a non-success HTTP status onto the provider taxonomy
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

/// Errors detected while building a translation service from configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A provider that needs credentials was configured without them
    #[error("API key is required for the {provider} provider (set it in the config file or DEEPSEEK_API_KEY)")]
    MissingApiKey {
        /// Provider name
        provider: String,
    },

    /// Provider selector names no known backend
    #[error("Unsupported translation provider '{0}' (expected 'bulk' or 'llm')")]
    UnsupportedProvider(String),

    /// A configuration value is out of range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },

    /// Language tag is not a recognised ISO 639 code
    #[error("Invalid language tag: {0}")]
    InvalidLanguage(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error in the service configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while reading transcripts and writing reports
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error reading or writing JSON documents
    #[error("JSON error: {0}")]
    Json(String),

    /// Error from translation setup
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}

impl AppError {
    /// File error naming the path involved
    pub fn file(action: &str, path: &std::path::Path, error: std::io::Error) -> Self {
        Self::File(format!("{} {}: {}", action, path.display(), error))
    }

    /// JSON error naming the path involved
    pub fn json(action: &str, path: &std::path::Path, error: serde_json::Error) -> Self {
        Self::Json(format!("{} {}: {}", action, path.display(), error))
    }
}
