//! API key resolution.
//!
//! Sources are consulted in precedence order, first non-empty value wins:
//! manual entry, environment variables, config file, build-time default.

use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Environment variables checked for an API key, in order.
pub const API_KEY_ENV_VARS: [&str; 4] = [
    "NUMSCOPE_API_KEY",
    "GEMINI_API_KEY",
    "GOOGLE_API_KEY",
    "API_KEY",
];

/// Key baked in at compile time, if any.
pub const BUILD_TIME_API_KEY: Option<&str> = option_env!("NUMSCOPE_BUILD_API_KEY");

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Entered by the user
    Manual,
    /// Read from the named environment variable
    Environment(&'static str),
    /// Read from the config file
    ConfigFile,
    /// Injected at build time
    BuildTime,
}

/// A resolved API key. Zeroed on drop and never printed.
#[derive(Clone)]
pub struct ApiKey {
    value: Zeroizing<String>,
    source: KeySource,
}

impl ApiKey {
    fn new(value: &str, source: KeySource) -> Self {
        Self {
            value: Zeroizing::new(value.to_string()),
            source,
        }
    }

    /// The raw key, for handing to a provider.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Where this key was resolved from.
    #[must_use]
    pub fn source(&self) -> KeySource {
        self.source
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves an API key from the configured sources.
///
/// The environment is read on every call, so a key exported after startup is
/// picked up by the next scan.
#[derive(Clone)]
pub struct CredentialResolver {
    env_lookup: EnvLookup,
    config_key: Option<String>,
    build_key: Option<String>,
}

impl CredentialResolver {
    /// Resolver backed by the process environment and the build-time key.
    #[must_use]
    pub fn from_env(config_key: Option<String>) -> Self {
        Self {
            env_lookup: Arc::new(|name: &str| std::env::var(name).ok()),
            config_key,
            build_key: BUILD_TIME_API_KEY.map(ToString::to_string),
        }
    }

    /// Resolver with an explicit environment lookup and build-time key.
    pub fn with_sources<F>(
        env_lookup: F,
        config_key: Option<String>,
        build_key: Option<String>,
    ) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            env_lookup: Arc::new(env_lookup),
            config_key,
            build_key,
        }
    }

    /// Resolver that only ever yields a manually entered key.
    #[must_use]
    pub fn manual_only() -> Self {
        Self::with_sources(|_| None, None, None)
    }

    /// Resolve a key, giving `manual` the highest precedence.
    #[must_use]
    pub fn resolve(&self, manual: Option<&str>) -> Option<ApiKey> {
        if let Some(key) = non_empty(manual) {
            return Some(ApiKey::new(key, KeySource::Manual));
        }

        for name in API_KEY_ENV_VARS {
            if let Some(key) = non_empty((self.env_lookup)(name).as_deref()) {
                tracing::debug!("Using API key from ${}", name);
                return Some(ApiKey::new(key, KeySource::Environment(name)));
            }
        }

        if let Some(key) = non_empty(self.config_key.as_deref()) {
            return Some(ApiKey::new(key, KeySource::ConfigFile));
        }

        non_empty(self.build_key.as_deref()).map(|key| ApiKey::new(key, KeySource::BuildTime))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
