/*!
 * Tests for error types and conversions
 */

use ytsubtrans::errors::{AppError, ConfigError, ProviderError, TranslationError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection reset".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection reset"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 500,
        message: "Internal error".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("500"));
    assert!(display.contains("Internal error"));
}

#[test]
fn test_providerError_fromStatus_shouldClassifyAuthAndRateLimit() {
    assert_eq!(
        ProviderError::from_status(401, "bad key".to_string()),
        ProviderError::AuthenticationError("bad key".to_string())
    );
    assert_eq!(
        ProviderError::from_status(403, "forbidden".to_string()),
        ProviderError::AuthenticationError("forbidden".to_string())
    );
    assert_eq!(
        ProviderError::from_status(429, "slow down".to_string()),
        ProviderError::RateLimitExceeded("slow down".to_string())
    );
    assert_eq!(
        ProviderError::from_status(502, "bad gateway".to_string()),
        ProviderError::ApiError {
            status_code: 502,
            message: "bad gateway".to_string()
        }
    );
}

#[test]
fn test_providerError_unsupported_shouldDisplayCorrectly() {
    let error = ProviderError::Unsupported("bulk cannot summarize".to_string());
    assert!(error.to_string().contains("not supported"));
    assert!(error.to_string().contains("bulk cannot summarize"));
}

#[test]
fn test_configError_missingApiKey_shouldMentionEnvironmentVariable() {
    let error = ConfigError::MissingApiKey {
        provider: "llm".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("llm"));
    assert!(display.contains("DEEPSEEK_API_KEY"));
}

#[test]
fn test_configError_unsupportedProvider_shouldNameProvider() {
    let error = ConfigError::UnsupportedProvider("babelfish".to_string());
    assert!(error.to_string().contains("babelfish"));
}

#[test]
fn test_translationError_fromConfigError_shouldWrapCorrectly() {
    let error: TranslationError = ConfigError::InvalidLanguage("xx-yy".to_string()).into();
    assert!(matches!(error, TranslationError::Config(ConfigError::InvalidLanguage(_))));
    assert!(error.to_string().contains("Configuration error"));
}

#[test]
fn test_appError_fileAndJson_shouldNamePath() {
    let path = std::path::Path::new("/tmp/missing.json");
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let error = AppError::file("Failed to read transcript", path, io_error);
    assert!(matches!(error, AppError::File(_)));
    assert!(error.to_string().contains("/tmp/missing.json"));

    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = AppError::json("Failed to parse transcript", path, json_error);
    assert!(matches!(error, AppError::Json(_)));
    assert!(error.to_string().starts_with("JSON error: Failed to parse transcript /tmp/missing.json"));
}

#[test]
fn test_appError_fromTranslationError_shouldNestMessage() {
    let error: AppError = TranslationError::Config(ConfigError::UnsupportedProvider("x".to_string())).into();
    let display = error.to_string();
    assert!(display.contains("Translation error"));
    assert!(display.contains("Unsupported translation provider"));
}
