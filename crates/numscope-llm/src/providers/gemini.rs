//! Google Gemini API provider implementation.

use super::common::{build_http_client, status_error, transport_error, DEFAULT_TIMEOUT_SECS};
use crate::error::{LlmError, Result};
use crate::provider::{
    CompletionRequest, CompletionResponse, LlmProvider, ProviderFactory, ResponseFormat, Usage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const PROVIDER_ID: &str = "gemini";

/// Google Gemini API provider.
///
/// Talks to Google's `generateContent` API with a single user turn.
pub struct GeminiProvider {
    api_key: Zeroizing<String>,
    model: String,
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an explicit endpoint and timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_options(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = build_http_client(timeout_secs)?;

        Ok(Self {
            api_key: Zeroizing::new(api_key.into()),
            model: model.into(),
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Convert internal request to Gemini API format.
    fn to_api_request(request: &CompletionRequest) -> GeminiRequest {
        let response_mime_type = match request.response_format {
            ResponseFormat::Json => Some("application/json".to_string()),
            ResponseFormat::Text => None,
        };

        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                response_mime_type,
            },
        }
    }

    /// Convert Gemini API response to internal format.
    fn convert_api_response(&self, response: GeminiResponse) -> Result<CompletionResponse> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| parse_error("no candidates in response"))?;

        let content = candidate
            .content
            .ok_or_else(|| {
                parse_error(&format!(
                    "candidate has no content (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ))
            })?
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<String>();

        Ok(CompletionResponse {
            content,
            model: response
                .model_version
                .unwrap_or_else(|| self.model.clone()),
            stop_reason: candidate.finish_reason,
            usage: response.usage_metadata.map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            }),
        })
    }
}

fn parse_error(message: &str) -> LlmError {
    LlmError::ParseError {
        provider: PROVIDER_ID.to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let api_request = Self::to_api_request(&request);

        tracing::debug!(model = %self.model, "sending Gemini generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(PROVIDER_ID, status, error_text));
        }

        let api_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| parse_error(&format!("Failed to parse response: {e}")))?;

        self.convert_api_response(api_response)
    }

    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Factory producing [`GeminiProvider`]s against a fixed endpoint.
#[derive(Debug, Clone)]
pub struct GeminiFactory {
    base_url: String,
    timeout_secs: u64,
}

impl GeminiFactory {
    /// Create a factory for the given endpoint and request timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs,
        }
    }
}

impl Default for GeminiFactory {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS)
    }
}

impl ProviderFactory for GeminiFactory {
    fn create(&self, api_key: &str, model: &str) -> Result<Arc<dyn LlmProvider>> {
        let provider =
            GeminiProvider::with_options(api_key, model, self.base_url.clone(), self.timeout_secs)?;
        Ok(Arc::new(provider))
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    model_version: Option<String>,
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}
