//! Numscope LLM - generative model access for intelligence reports.
//!
//! This crate provides a small provider abstraction over hosted language
//! models together with a Google Gemini implementation.
//!
//! # Features
//!
//! - **Provider Abstraction**: [`LlmProvider`] trait for completion backends
//! - **Per-call Construction**: [`ProviderFactory`] builds a provider from a
//!   resolved API key and model, so no shared client outlives a credential
//! - **JSON Mode**: [`ResponseFormat::Json`] asks the backend for JSON output
//!
//! # Example
//!
//! ```rust,no_run
//! use numscope_llm::{CompletionRequest, GeminiFactory, ProviderFactory, ResponseFormat};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = GeminiFactory::default();
//! let provider = factory.create("my-api-key", "gemini-2.5-flash")?;
//!
//! let request = CompletionRequest::new("Describe +6281234567890 as JSON")
//!     .with_response_format(ResponseFormat::Json);
//! let response = provider.complete(request).await?;
//!
//! println!("Response: {}", response.content);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod provider;
pub mod providers;

// Re-export commonly used types
pub use error::{LlmError, Result};
pub use provider::{
    CompletionRequest, CompletionResponse, LlmProvider, ProviderFactory, ResponseFormat, Usage,
};
pub use providers::{GeminiFactory, GeminiProvider};
