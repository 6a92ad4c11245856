/*!
 * Tests for the translation service operations
 */

use std::sync::Arc;

use parking_lot::Mutex;
use ytsubtrans::app_config::{Config, TranslationProvider};
use ytsubtrans::errors::{ConfigError, TranslationError};
use ytsubtrans::transcript::{Chapter, Cue};
use ytsubtrans::translation::TranslationService;
use ytsubtrans::translation::core::{BULK_SUMMARY_NOTICE, NO_CONTENT_SUMMARY, SUMMARY_FAILED_PREFIX};

use crate::common::mock_backends::{DocumentBackend, FailingBackend, FlakyBackend, UppercaseBackend};
use crate::common::{fast_options, service_with, strings};

#[test]
fn test_service_new_withBulkProvider_shouldSelectBulkBackend() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Bulk;
    let service = TranslationService::new(&config).unwrap();
    assert_eq!(service.backend_name(), "bulk");
    assert_eq!(service.target_language(), "zh-CN");
    assert_eq!(service.options().batch_size, 100);
}

#[test]
fn test_service_new_withLlmProviderAndKey_shouldSelectLlmBackend() {
    let mut config = Config::default();
    config.translation.llm.api_key = "sk-test".to_string();
    config.translation.concurrent_workers = 8;
    let service = TranslationService::new(&config).unwrap();
    assert_eq!(service.backend_name(), "llm");
    assert_eq!(service.options().workers, 8);
}

#[test]
fn test_service_new_withInvalidLanguage_shouldFailBeforeAnyWork() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Bulk;
    config.target_language = "qq-ZZ".to_string();
    let result = TranslationService::new(&config);
    assert!(matches!(
        result,
        Err(TranslationError::Config(ConfigError::InvalidLanguage(_)))
    ));
}

#[tokio::test]
async fn test_translateTexts_withEmptyInput_shouldNotCallBackend() {
    let backend = Arc::new(UppercaseBackend::new());
    let service = service_with(backend.clone(), fast_options(10, 2, 0));
    assert!(service.translate_texts(&[]).await.is_empty());
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_translateTexts_withOnlyBlanks_shouldPassThrough() {
    let backend = Arc::new(UppercaseBackend::new());
    let service = service_with(backend.clone(), fast_options(10, 2, 0));
    let input = strings(&["", "  ", ""]);
    assert_eq!(service.translate_texts(&input).await, input);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_translateTexts_withDedupDisabled_shouldSendEveryPosition() {
    let backend = Arc::new(UppercaseBackend::new());
    let mut options = fast_options(10, 1, 0);
    options.deduplicate = false;
    let service = service_with(backend.clone(), options);

    let output = service.translate_texts(&strings(&["a", "a", "b"])).await;
    assert_eq!(output, strings(&["A", "A", "B"]));
    assert_eq!(backend.fragments(), strings(&["a", "a", "b"]));
}

#[tokio::test]
async fn test_translateTexts_withFlakyBackend_shouldRecoverWithinRetries() {
    let backend = Arc::new(FlakyBackend::new(2));
    let service = service_with(backend.clone(), fast_options(10, 1, 2));
    let report = service.translate_texts_with_report(&strings(&["x", "y"])).await;
    assert_eq!(report.texts, strings(&["X", "Y"]));
    assert!(!report.has_fallback());
    assert_eq!(backend.call_count(), 3);
}

#[tokio::test]
async fn test_translateTextsWithReport_withFailingBackend_shouldReportFallback() {
    let backend = Arc::new(FailingBackend::new());
    let service = service_with(backend, fast_options(2, 2, 0));
    let report = service.translate_texts_with_report(&strings(&["a", "b", "c"])).await;
    assert_eq!(report.texts, strings(&["a", "b", "c"]));
    assert_eq!(report.unique_count, 3);
    assert_eq!(report.stats.batches, 2);
    assert_eq!(report.stats.fallback_batches, 2);
    assert_eq!(report.stats.fallback_fragments, 3);
}

#[tokio::test]
async fn test_translateTexts_withProgressCallback_shouldReportEachBatch() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let service = service_with(Arc::new(UppercaseBackend::new()), fast_options(2, 1, 0))
        .with_progress(Arc::new(move |done, total| sink.lock().push((done, total))));

    service.translate_texts(&strings(&["a", "b", "c", "a", "d", "e"])).await;
    assert_eq!(*seen.lock(), vec![(2, 5), (4, 5), (5, 5)]);
}

#[tokio::test]
async fn test_translateItems_shouldTranslateCueTexts() {
    let service = service_with(Arc::new(UppercaseBackend::new()), fast_options(10, 1, 0));
    let cues = vec![Cue::new(0.0, 1.0, "one"), Cue::new(1.0, 1.0, ""), Cue::new(2.0, 1.0, "one")];
    assert_eq!(service.translate_items(&cues).await, strings(&["ONE", "", "ONE"]));
}

#[tokio::test]
async fn test_translateFullAndSplit_withDocumentBackend_shouldParseParagraphs() {
    let service = service_with(Arc::new(DocumentBackend::default()), fast_options(10, 1, 0));
    let paragraphs = service.translate_full_and_split("one.\ntwo.").await;
    assert_eq!(paragraphs, strings(&["第一段。", "第二段。"]));
}

#[tokio::test]
async fn test_translateFullAndSplit_withBlankDocument_shouldReturnNothing() {
    let backend = Arc::new(FailingBackend::with_documents());
    let service = service_with(backend.clone(), fast_options(10, 1, 3));
    assert!(service.translate_full_and_split(" \n ").await.is_empty());
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_translateFullAndSplit_withFailingDocumentBackend_shouldReturnWholeDocument() {
    let backend = Arc::new(FailingBackend::with_documents());
    let service = service_with(backend.clone(), fast_options(10, 1, 2));
    let paragraphs = service.translate_full_and_split("  one.\ntwo.  ").await;
    assert_eq!(paragraphs, strings(&["one.\ntwo."]));
    assert_eq!(backend.call_count(), 3);
}

#[tokio::test]
async fn test_translateFullAndSplit_withBatchOnlyBackend_shouldSplitLocally() {
    let backend = Arc::new(UppercaseBackend::new());
    let service = service_with(backend.clone(), fast_options(10, 1, 0));
    let paragraphs = service
        .translate_full_and_split("First one. Second one!\n\nThird")
        .await;
    assert_eq!(paragraphs, strings(&["FIRST ONE.", "SECOND ONE!", "THIRD"]));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_generateSummary_shouldCoverEveryOutcome() {
    let llm = service_with(Arc::new(DocumentBackend::default()), fast_options(10, 1, 0));
    assert_eq!(llm.generate_summary("").await, NO_CONTENT_SUMMARY);
    assert_eq!(llm.generate_summary("text").await, "摘要");

    let bulk = service_with(Arc::new(UppercaseBackend::new()), fast_options(10, 1, 0));
    assert_eq!(bulk.generate_summary("text").await, BULK_SUMMARY_NOTICE);

    let failing = service_with(Arc::new(FailingBackend::with_documents()), fast_options(10, 1, 1));
    let summary = failing.generate_summary("text").await;
    assert!(summary.starts_with(SUMMARY_FAILED_PREFIX), "{}", summary);
    assert!(summary.contains("connection refused"));
}

#[tokio::test]
async fn test_translateTitle_shouldFallBackToSource() {
    let ok = service_with(Arc::new(DocumentBackend::default()), fast_options(10, 1, 0));
    assert_eq!(ok.translate_title("A test video").await, "测试视频");
    assert_eq!(ok.translate_title("   ").await, "");

    let failing = service_with(Arc::new(FailingBackend::new()), fast_options(10, 1, 1));
    assert_eq!(failing.translate_title(" A test video ").await, "A test video");
}

#[tokio::test]
async fn test_translateChapters_withDocumentBackend_shouldMatchByIndex() {
    let backend = DocumentBackend {
        heading_answer: strings(&["开场"]),
        ..DocumentBackend::default()
    };
    let service = service_with(Arc::new(backend), fast_options(10, 1, 0));

    let mut intro = Chapter::new(0.0, "Intro");
    intro.extra.insert("end_time".to_string(), serde_json::json!(5.0));
    let chapters = service
        .translate_chapters(vec![intro, Chapter::new(5.0, "Outro")])
        .await;

    assert_eq!(chapters[0].translated_title.as_deref(), Some("开场"));
    assert_eq!(chapters[1].translated_title.as_deref(), Some("Outro"));
    assert_eq!(chapters[0].extra.get("end_time"), Some(&serde_json::json!(5.0)));
    assert_eq!(chapters[1].start_time, 5.0);
}

#[tokio::test]
async fn test_translateChapters_withBatchOnlyBackend_shouldUseBatchPath() {
    let service = service_with(Arc::new(UppercaseBackend::new()), fast_options(10, 1, 0));
    let chapters = service
        .translate_chapters(vec![Chapter::new(0.0, "Intro"), Chapter::new(5.0, "Intro")])
        .await;
    let titles: Vec<_> = chapters.iter().map(|c| c.translated_title.clone()).collect();
    assert_eq!(titles, vec![Some("INTRO".to_string()), Some("INTRO".to_string())]);
}

#[tokio::test]
async fn test_translateChapters_withFailingBackend_shouldKeepSourceTitles() {
    let service = service_with(Arc::new(FailingBackend::with_documents()), fast_options(10, 1, 0));
    let chapters = service.translate_chapters(vec![Chapter::new(0.0, "Intro")]).await;
    assert_eq!(chapters[0].translated_title.as_deref(), Some("Intro"));
}
