//! Configuration management for Numscope.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const REDACTED: &str = "********";

/// Main application configuration.
///
/// This is loaded from `~/.config/numscope/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Language model settings
    pub llm: LlmConfig,
    /// Scan pacing and report settings
    pub scan: ScanConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `NUMSCOPE_PRIMARY_MODEL`: Override the primary model
    /// - `NUMSCOPE_FALLBACK_MODEL`: Override the fallback model
    /// - `NUMSCOPE_REPORT_LANGUAGE`: Override the report language
    /// - `NUMSCOPE_SUCCESS_PAUSE_MS`: Override the pause before showing a report
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup function.
    ///
    /// Empty values and values that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(model) = lookup("NUMSCOPE_PRIMARY_MODEL") {
            tracing::debug!("Override llm.primary_model from env: {}", model);
            self.llm.primary_model = model;
        }

        if let Some(model) = lookup("NUMSCOPE_FALLBACK_MODEL") {
            tracing::debug!("Override llm.fallback_model from env: {}", model);
            self.llm.fallback_model = model;
        }

        if let Some(language) = lookup("NUMSCOPE_REPORT_LANGUAGE") {
            tracing::debug!("Override scan.report_language from env: {}", language);
            self.scan.report_language = language;
        }

        if let Some(val) = lookup("NUMSCOPE_SUCCESS_PAUSE_MS") {
            if let Ok(ms) = val.trim().parse() {
                self.scan.success_pause_ms = ms;
                tracing::debug!("Override scan.success_pause_ms from env: {}", ms);
            }
        }
    }

    /// Check that the configuration values are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.llm.primary_model.trim().is_empty() {
            return Err(invalid("llm.primary_model", "must not be empty"));
        }
        if self.llm.fallback_model.trim().is_empty() {
            return Err(invalid("llm.fallback_model", "must not be empty"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(invalid("llm.timeout_secs", "must be greater than zero"));
        }
        if self.scan.progress_tick_ms == 0 {
            return Err(invalid("scan.progress_tick_ms", "must be greater than zero"));
        }
        if self.scan.progress_max_increment == 0 || self.scan.progress_max_increment > 100 {
            return Err(invalid(
                "scan.progress_max_increment",
                "must be between 1 and 100",
            ));
        }
        Ok(())
    }

    /// Copy of this configuration that is safe to print.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.llm.api_key.is_some() {
            copy.llm.api_key = Some(REDACTED.to_string());
        }
        copy
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/numscope/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "numscope", "numscope").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Fast model tried first
    pub primary_model: String,
    /// More capable model tried once when the primary fails
    pub fallback_model: String,
    /// Gemini API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature
    pub temperature: f32,
    /// API key from the config file. Manual entry and the environment take precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            primary_model: "gemini-2.5-flash".to_string(),
            fallback_model: "gemini-2.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
            temperature: 0.7,
            api_key: None,
        }
    }
}

/// Scan pacing and report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Language the report narrative is written in
    pub report_language: String,
    /// Interval between progress ticks in milliseconds
    pub progress_tick_ms: u64,
    /// Upper bound of the random progress increment per tick
    pub progress_max_increment: u8,
    /// Pause between a successful response and showing the report, in milliseconds
    pub success_pause_ms: u64,
}

impl ScanConfig {
    /// Interval between progress ticks.
    #[must_use]
    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }

    /// Pause before the success state is shown.
    #[must_use]
    pub fn success_pause(&self) -> Duration {
        Duration::from_millis(self.success_pause_ms)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            report_language: "English".to_string(),
            progress_tick_ms: 300,
            progress_max_increment: 15,
            success_pause_ms: 1500,
        }
    }
}
