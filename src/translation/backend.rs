/*!
 * Translation backends.
 *
 * `BatchTranslator` is the capability interface the pipeline dispatches to.
 * Two implementations exist:
 * - `BulkTranslator`: a machine translation service, one request per fragment,
 *   count-matched by construction. It has no document capabilities.
 * - `LlmTranslator`: a chat model driven by prompts. It can translate whole
 *   documents, summarize and translate headings, but its batch output is only
 *   as well-formed as the model's obedience to the prompt.
 *
 * The backend is chosen once when the service is built and shared read-only
 * by all workers.
 */

use async_trait::async_trait;
use log::debug;
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils::prompt_language_name;
use crate::providers::Provider;
use crate::providers::google::{GoogleRequest, GoogleResponse, GoogleTranslate};
use crate::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};

use super::formatting::{single_line, split_lines, strip_code_fence};
use super::prompts::{self, Prompt};

/// Uniform "translate a batch of strings" capability
#[async_trait]
pub trait BatchTranslator: Send + Sync + Debug {
    /// Short backend name for logs and reports
    fn name(&self) -> &str;

    /// Translate `texts`; the result should have the same length, but callers normalize it
    async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError>;

    /// Whether whole-document translation, summaries and heading prompts are available
    fn supports_documents(&self) -> bool {
        false
    }

    /// Translate a whole document and return it re-paragraphed (blank-line separated)
    async fn translate_document(
        &self,
        _document: &str,
        _target_language: &str,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Unsupported(format!("{} cannot translate documents", self.name())))
    }

    /// Summarize a whole document in the target language
    async fn summarize(&self, _document: &str, _target_language: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Unsupported(format!("{} cannot summarize", self.name())))
    }

    /// Translate a list of headings in one request, one output line per heading
    async fn translate_headings(
        &self,
        _titles: &[String],
        _target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        Err(ProviderError::Unsupported(format!("{} cannot translate headings", self.name())))
    }

    /// Translate a single title
    async fn translate_title(&self, title: &str, target_language: &str) -> Result<String, ProviderError> {
        let texts = [title.to_string()];
        let translated = self.translate_batch(&texts, target_language).await?;
        translated
            .into_iter()
            .next()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse(self.name().to_string()))
    }
}

/// Bulk machine translation backend
#[derive(Debug)]
pub struct BulkTranslator<P = GoogleTranslate> {
    client: P,
    source_language: String,
}

impl<P> BulkTranslator<P>
where
    P: Provider<Request = GoogleRequest, Response = GoogleResponse>,
{
    /// Create a bulk backend over a machine translation client
    pub fn new(client: P, source_language: impl Into<String>) -> Self {
        Self {
            client,
            source_language: source_language.into(),
        }
    }
}

#[async_trait]
impl<P> BatchTranslator for BulkTranslator<P>
where
    P: Provider<Request = GoogleRequest, Response = GoogleResponse>,
{
    fn name(&self) -> &str {
        "bulk"
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let mut translated = Vec::with_capacity(texts.len());
        for text in texts {
            if text.trim().is_empty() {
                translated.push(text.clone());
                continue;
            }
            let request = GoogleRequest::new(text.as_str(), self.source_language.as_str(), target_language);
            let response = self.client.complete(request).await?;
            let output = P::extract_text(&response);
            if output.trim().is_empty() {
                return Err(ProviderError::EmptyResponse("bulk translation".to_string()));
            }
            translated.push(output.trim().to_string());
        }
        Ok(translated)
    }
}

/// Settings for LLM requests
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub model: String,
    pub temperature: f32,
    pub title_temperature: f32,
    pub batch_timeout: Duration,
    pub document_timeout: Duration,
    pub title_timeout: Duration,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "deepseek-chat".to_string(),
            temperature: 0.2,
            title_temperature: 0.1,
            batch_timeout: Duration::from_secs(60),
            document_timeout: Duration::from_secs(120),
            title_timeout: Duration::from_secs(30),
        }
    }
}

/// Conversational LLM backend
#[derive(Debug)]
pub struct LlmTranslator<P = OpenAI> {
    client: P,
    settings: LlmSettings,
}

impl<P> LlmTranslator<P>
where
    P: Provider<Request = OpenAIRequest, Response = OpenAIResponse>,
{
    /// Create an LLM backend over a chat completions client
    pub fn new(client: P, settings: LlmSettings) -> Self {
        Self { client, settings }
    }

    /// Underlying chat client
    pub fn client(&self) -> &P {
        &self.client
    }

    /// Send one prompt and return the fence-stripped answer
    async fn chat(&self, prompt: Prompt, temperature: f32, timeout: Duration) -> Result<String, ProviderError> {
        let request = OpenAIRequest::new(self.settings.model.as_str())
            .add_message("system", prompt.system)
            .add_message("user", prompt.user)
            .temperature(temperature)
            .timeout(timeout);

        let response = tokio::time::timeout(timeout, self.client.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout(format!("no answer within {:?}", timeout)))??;

        let text = strip_code_fence(&P::extract_text(&response));
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse(format!("model {}", self.settings.model)));
        }
        Ok(text)
    }
}

#[async_trait]
impl<P> BatchTranslator for LlmTranslator<P>
where
    P: Provider<Request = OpenAIRequest, Response = OpenAIResponse>,
{
    fn name(&self) -> &str {
        "llm"
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let lines: Vec<String> = texts.iter().map(|t| single_line(t)).collect();
        let language = prompt_language_name(target_language);
        let prompt = prompts::batch_prompt(&lines, &language);

        let answer = self
            .chat(prompt, self.settings.temperature, self.settings.batch_timeout)
            .await?;
        let output = split_lines(&answer);
        if output.len() != texts.len() {
            debug!(
                "Model returned {} line(s) for a batch of {}",
                output.len(),
                texts.len()
            );
        }
        Ok(output)
    }

    fn supports_documents(&self) -> bool {
        true
    }

    async fn translate_document(&self, document: &str, target_language: &str) -> Result<String, ProviderError> {
        let language = prompt_language_name(target_language);
        let prompt = prompts::document_prompt(document, &language);
        self.chat(prompt, self.settings.temperature, self.settings.document_timeout)
            .await
    }

    async fn summarize(&self, document: &str, target_language: &str) -> Result<String, ProviderError> {
        let language = prompt_language_name(target_language);
        let prompt = prompts::summary_prompt(document, &language);
        self.chat(prompt, self.settings.temperature, self.settings.document_timeout)
            .await
    }

    async fn translate_headings(
        &self,
        titles: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let lines: Vec<String> = titles.iter().map(|t| single_line(t)).collect();
        let language = prompt_language_name(target_language);
        let prompt = prompts::chapters_prompt(&lines, &language);
        let answer = self
            .chat(prompt, self.settings.title_temperature, self.settings.batch_timeout)
            .await?;
        Ok(answer
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn translate_title(&self, title: &str, target_language: &str) -> Result<String, ProviderError> {
        let language = prompt_language_name(target_language);
        let prompt = prompts::title_prompt(title, &language);
        self.chat(prompt, self.settings.title_temperature, self.settings.title_timeout)
            .await
    }
}
