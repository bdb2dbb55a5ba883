//! Numscope Scanner - phone number intelligence scans.
//!
//! This crate turns a raw phone number into an intelligence report. It
//! validates the number, asks a language model for a report (with a one-shot
//! fallback to a second model), paces a cosmetic progress indicator, and
//! exposes the whole lifecycle as a small state machine.
//!
//! # Features
//!
//! - International number validation backed by libphonenumber metadata
//! - API key resolution from manual entry, environment, config and build
//! - Primary/fallback model retry with strict report parsing
//! - Session tokens so a superseded scan can never overwrite a newer one
//!
//! # Example
//!
//! ```rust,no_run
//! use numscope_core::AppConfig;
//! use numscope_scanner::{Phase, ScanController};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = ScanController::from_config(&AppConfig::load_with_env()?);
//!
//! if let Some(view) = controller.submit("+6281234567890").finished().await {
//!     match view.phase {
//!         Phase::Success => println!("{:#?}", view.report),
//!         _ => println!("{}", view.error.unwrap_or_default()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod controller;
pub mod credentials;
#[allow(missing_docs)]
pub mod error;
pub mod progress;
pub mod prompt;
pub mod report;
pub mod requester;
pub mod validator;

// Re-export commonly used types
pub use controller::{Phase, ScanController, ScanPacing, ScreenView, SessionHandle};
pub use credentials::{ApiKey, CredentialResolver, KeySource, API_KEY_ENV_VARS};
pub use error::{Result, ScanError};
pub use progress::{ProgressHandle, ProgressSettings, ProgressSimulator, PROGRESS_MAX};
pub use prompt::build_report_prompt;
pub use report::parse_report;
pub use requester::ReportRequester;
pub use validator::{validate, NON_GEOGRAPHIC_REGION};
