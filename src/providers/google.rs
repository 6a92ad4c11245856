use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Client for the Google Translate `translate_a/single` endpoint (no API key)
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, normally "https://translate.googleapis.com"
    endpoint: String,
}

/// One text to translate
#[derive(Debug, Clone)]
pub struct GoogleRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, or "auto"
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

/// Raw response; a nested array whose first element lists translated sentences
#[derive(Debug, Clone)]
pub struct GoogleResponse {
    pub body: Value,
}

impl GoogleRequest {
    /// Create a new translation request
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

impl GoogleTranslate {
    /// Create a new client with a request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .pool_max_idle_per_host(16)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the request URL for one text
    pub fn request_url(&self, request: &GoogleRequest) -> Result<Url, ProviderError> {
        let base = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));
        Url::parse_with_params(
            &base,
            &[
                ("client", "gtx"),
                ("sl", request.source_language.as_str()),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("invalid translate URL: {}", e)))
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = GoogleRequest;
    type Response = GoogleResponse;

    async fn complete(&self, request: GoogleRequest) -> Result<GoogleResponse, ProviderError> {
        let url = self.request_url(&request)?;

        let response = self
            .client
            .get(url)
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest("google translate", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Google Translate error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(GoogleResponse { body })
    }

    fn extract_text(response: &GoogleResponse) -> String {
        let mut result = String::new();
        if let Some(sentences) = response.body.get(0).and_then(|v| v.as_array()) {
            for sentence in sentences {
                if let Some(translated) = sentence.get(0).and_then(|v| v.as_str()) {
                    result.push_str(translated);
                }
            }
        }
        result
    }
}
