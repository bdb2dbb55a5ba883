//! Numscope Core - Foundation crate for the Numscope number intelligence tool.
//!
//! This crate provides shared types, error handling, and configuration
//! management that all other Numscope crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Shared domain types (`ParsedNumber`, `IntelReport`, `SessionId`)
//!
//! # Example
//!
//! ```rust
//! use numscope_core::{AppConfig, SecurityRisk};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//! assert_eq!(config.scan.progress_max_increment, 15);
//! assert_eq!("High".parse::<SecurityRisk>()?, SecurityRisk::High);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, LlmConfig, ScanConfig};
pub use error::{ConfigError, ConfigResult, NumscopeError, Result};
pub use types::{IntelReport, ParsedNumber, SecurityRisk, SessionId};
