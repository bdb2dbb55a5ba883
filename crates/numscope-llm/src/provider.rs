//! Provider trait and request/response types.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A language model that answers a single prompt.
///
/// Implementations must be `Send + Sync` so one can be shared across tasks.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send `request` and return the model's answer.
    ///
    /// # Errors
    /// Returns error if the provider fails, network issues occur, or response parsing fails.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short provider name used in errors and logs.
    fn provider_id(&self) -> &str;

    /// Model this provider talks to.
    fn model(&self) -> &str;
}

/// Builds providers from a resolved credential and model name.
///
/// Callers construct a fresh provider for each request instead of sharing
/// one long-lived client, so a changed credential takes effect on the next
/// call.
pub trait ProviderFactory: Send + Sync {
    /// Create a provider for `model` authenticated with `api_key`.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be created.
    fn create(&self, api_key: &str, model: &str) -> Result<Arc<dyn LlmProvider>>;
}

/// Output format requested from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Free-form text
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// One prompt sent to a model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Prompt text
    pub prompt: String,
    /// Sampling temperature, provider default when unset
    pub temperature: Option<f32>,
    /// Requested output format
    pub response_format: ResponseFormat,
}

impl CompletionRequest {
    /// Create a free-text request for `prompt`.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: None,
            response_format: ResponseFormat::Text,
        }
    }

    /// Set the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the requested output format.
    #[must_use]
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

/// Answer returned by a model.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,
    /// Model version that answered
    pub model: String,
    /// Finish reason reported by the provider, e.g. `STOP`
    pub stop_reason: Option<String>,
    /// Token counts, when reported
    pub usage: Option<Usage>,
}

/// Token counts for one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    /// Prompt tokens
    pub input_tokens: u32,
    /// Generated tokens
    pub output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = CompletionRequest::new("Describe +6281234567890")
            .with_temperature(0.7)
            .with_response_format(ResponseFormat::Json);

        assert_eq!(req.prompt, "Describe +6281234567890");
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.response_format, ResponseFormat::Json);
    }

    #[test]
    fn test_new_request_is_plain_text() {
        let req = CompletionRequest::new("Hello");
        assert_eq!(req.response_format, ResponseFormat::Text);
        assert!(req.temperature.is_none());
    }
}
