use numscope_llm::LlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid phone number: {0}")]
    Validation(String),

    #[error("no API key available from manual entry, environment, config or build")]
    MissingCredential,

    #[error("report request failed: {0}")]
    Provider(#[from] LlmError),

    #[error("malformed report: {0}")]
    MalformedReport(String),
}

impl ScanError {
    /// Message shown to the user for this failure.
    ///
    /// Validation and provider failures carry their cause; a malformed report
    /// only asks the user to retry.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(reason) => format!(
                "Invalid phone number: {reason}. Use international format, e.g. +6281234567890."
            ),
            Self::MissingCredential => {
                "API key not found. Enter an API key manually to continue.".to_string()
            }
            Self::Provider(err) => format!("Failed to obtain report: {err}"),
            Self::MalformedReport(_) => {
                "Failed to obtain intelligence report. Please try again.".to_string()
            }
        }
    }

    /// Whether the UI should reveal manual key entry.
    #[must_use]
    pub fn needs_manual_key(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err =
            ScanError::Validation("'+62812' is not a valid number for its country".to_string());
        assert_eq!(
            err.user_message(),
            "Invalid phone number: '+62812' is not a valid number for its country. \
             Use international format, e.g. +6281234567890."
        );
        assert!(!err.needs_manual_key());

        let err = ScanError::MissingCredential;
        assert!(err.user_message().contains("API key"));
        assert!(err.needs_manual_key());

        let err = ScanError::MalformedReport("expected value at line 1".to_string());
        assert!(!err.user_message().contains("line 1"));
    }

    #[test]
    fn test_provider_error_conversion() {
        let err: ScanError = LlmError::Timeout { seconds: 60 }.into();
        assert!(matches!(err, ScanError::Provider(_)));
        assert!(err.user_message().contains("timed out"));
    }
}
