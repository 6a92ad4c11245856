/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;

use ytsubtrans::app_config::{Config, LogLevel, TranslationConfig, TranslationProvider};
use ytsubtrans::errors::ConfigError;

use crate::common;

fn llm_config_with_key() -> Config {
    let mut config = Config::default();
    config.translation.llm.api_key = "sk-test".to_string();
    config
}

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, "zh-CN");
    assert_eq!(config.translation.provider, TranslationProvider::Llm);
    assert_eq!(config.translation.batch_size, 100);
    assert_eq!(config.translation.max_retries, 3);
    assert_eq!(config.translation.retry_delay_ms, 2000);
    assert_eq!(config.translation.concurrent_workers, 4);
    assert!(config.translation.deduplicate);
    assert!(!config.translation.translate_cues);
    assert_eq!(config.translation.bulk.endpoint, "https://translate.googleapis.com");
    assert_eq!(config.translation.bulk.source_language, "auto");
    assert_eq!(config.translation.llm.endpoint, "https://api.deepseek.com");
    assert_eq!(config.translation.llm.model, "deepseek-chat");
    assert_eq!(config.translation.llm.batch_timeout_secs, 60);
    assert_eq!(config.translation.llm.document_timeout_secs, 120);
    assert_eq!(config.translation.llm.title_timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = llm_config_with_key();
    assert!(config.validate().is_ok());

    config.target_language = "".to_string();
    assert!(config.validate().is_err());
    config.target_language = "fr".to_string();
    assert!(config.validate().is_ok());

    config.translation.llm.temperature = 2.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field, .. }) if field == "llm.temperature"
    ));
    config.translation.llm.temperature = 0.2;

    config.translation.batch_size = 0;
    assert!(config.validate().is_err());
    config.translation.batch_size = 1;

    config.translation.concurrent_workers = 0;
    assert!(config.validate().is_err());
    config.translation.concurrent_workers = 1;

    config.translation.llm.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withBulkProvider_shouldNotNeedApiKey() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Bulk;
    config.translation.llm.api_key = String::new();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withBlankApiKey_shouldReportMissingKey() {
    // Only meaningful when the environment does not provide a key
    if std::env::var("DEEPSEEK_API_KEY").is_ok_and(|k| !k.trim().is_empty()) {
        return;
    }
    let mut config = Config::default();
    config.translation.llm.api_key = "   ".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey { .. })));
}

#[test]
fn test_provider_fromStr_withAliases_shouldParse() {
    assert_eq!(TranslationProvider::from_str("bulk").unwrap(), TranslationProvider::Bulk);
    assert_eq!(TranslationProvider::from_str("Google").unwrap(), TranslationProvider::Bulk);
    assert_eq!(TranslationProvider::from_str("llm").unwrap(), TranslationProvider::Llm);
    assert_eq!(TranslationProvider::from_str(" deepseek ").unwrap(), TranslationProvider::Llm);
    assert!(matches!(
        TranslationProvider::from_str("babelfish"),
        Err(ConfigError::UnsupportedProvider(_))
    ));
}

#[test]
fn test_provider_deserialize_withUnknownName_shouldFail() {
    let json = r#"{"provider": "babelfish"}"#;
    assert!(serde_json::from_str::<TranslationConfig>(json).is_err());

    let json = r#"{"provider": "google", "batch_size": 20}"#;
    let config: TranslationConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.provider, TranslationProvider::Bulk);
    assert_eq!(config.batch_size, 20);
    assert_eq!(config.concurrent_workers, 4);
}

#[test]
fn test_effective_sizes_withZeroValues_shouldClampToOne() {
    let mut config = TranslationConfig::default();
    config.batch_size = 0;
    config.concurrent_workers = 0;
    assert_eq!(config.effective_batch_size(), 1);
    assert_eq!(config.effective_workers(), 1);
}

#[test]
fn test_config_saveAndLoad_withTempFile_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = llm_config_with_key();
    config.target_language = "ja".to_string();
    config.translation.provider = TranslationProvider::Bulk;
    config.translation.batch_size = 25;
    config.translation.deduplicate = false;
    config.log_level = LogLevel::Debug;
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.target_language, "ja");
    assert_eq!(loaded.translation.provider, TranslationProvider::Bulk);
    assert_eq!(loaded.translation.batch_size, 25);
    assert!(!loaded.translation.deduplicate);
    assert_eq!(loaded.log_level, LogLevel::Debug);
}

#[test]
fn test_config_fromFile_withPartialJson_shouldFillDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"target_language": "fr", "translation": {"llm": {"model": "deepseek-reasoner"}}}"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.translation.llm.model, "deepseek-reasoner");
    assert_eq!(config.translation.llm.temperature, 0.2);
    assert_eq!(config.translation.retry_delay_ms, 2000);
}

#[test]
fn test_config_fromFile_withMissingFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    assert!(Config::from_file(temp_dir.path().join("absent.json")).is_err());
}

#[test]
fn test_logLevel_toLevelFilter_shouldMap() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
