/*!
 * HTTP clients for the remote translation services.
 *
 * This module contains client implementations for the two backend families:
 * - OpenAI: OpenAI-compatible chat completions (DeepSeek by default)
 * - Google: bulk machine translation through the public translate endpoint
 *
 * Clients only speak the wire protocol. Prompting, batching and retries live
 * in `crate::translation`.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all provider clients
///
/// This trait defines the interface that all client implementations must follow,
/// allowing them to be driven the same way by the translation backends.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract text from the provider response
    ///
    /// # Arguments
    /// * `response` - The response from the provider
    ///
    /// # Returns
    /// * `String` - The extracted text
    fn extract_text(response: &Self::Response) -> String;
}

pub mod google;
pub mod openai;
