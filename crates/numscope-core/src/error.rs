//! Core error types for the Numscope application.
//!
//! This module defines the central error type shared by the library crates.
//! Subsystem crates keep their own error enums and convert into this one at
//! their boundaries where needed.

use thiserror::Error;

/// Central error type for Numscope operations.
#[derive(Error, Debug)]
pub enum NumscopeError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `NumscopeError`.
pub type Result<T> = std::result::Result<T, NumscopeError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NumscopeError::Validation("unknown risk level".to_string());
        assert_eq!(err.to_string(), "validation error: unknown risk level");

        let err = ConfigError::InvalidValue {
            field: "scan.progress_tick_ms".to_string(),
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for scan.progress_tick_ms: must be greater than zero"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let err: NumscopeError = config_err.into();
        assert!(matches!(err, NumscopeError::Config(_)));
    }
}
