//! Common utilities shared across LLM providers.

use crate::error::{LlmError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Build an HTTP client whose requests time out after `timeout_secs`.
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| LlmError::Internal(format!("failed to create HTTP client: {e}")))
}

/// Map a non-success HTTP status to the matching error variant.
#[must_use]
pub fn status_error(provider: &str, status: StatusCode, body: String) -> LlmError {
    let provider = provider.to_string();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::AuthenticationFailed {
            provider,
            message: body,
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded {
            provider,
            message: body,
        },
        _ => LlmError::ApiError {
            provider,
            status: status.as_u16(),
            message: body,
        },
    }
}

/// Convert a transport error, keeping timeouts distinct.
#[must_use]
pub fn transport_error(err: reqwest::Error, timeout_secs: u64) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout {
            seconds: timeout_secs,
        }
    } else {
        LlmError::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(30).is_ok());
        assert!(build_http_client(DEFAULT_TIMEOUT_SECS).is_ok());
    }

    #[test]
    fn test_status_error_mapping() {
        let err = status_error("gemini", StatusCode::FORBIDDEN, "bad key".to_string());
        assert!(matches!(err, LlmError::AuthenticationFailed { .. }));

        let err = status_error("gemini", StatusCode::TOO_MANY_REQUESTS, "quota".to_string());
        assert!(matches!(err, LlmError::RateLimitExceeded { .. }));

        let err = status_error("gemini", StatusCode::SERVICE_UNAVAILABLE, "down".to_string());
        assert!(matches!(err, LlmError::ApiError { status: 503, .. }));
    }
}
