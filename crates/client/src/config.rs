//! Client configuration: defaults, then environment, then CLI overrides.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://qkart-zeta.vercel.app/v1";

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_HTTP_TIMEOUT_MS: &str = "STOREFRONT_HTTP_TIMEOUT_MS";
pub const ENV_MAX_RETRIES: &str = "STOREFRONT_MAX_RETRIES";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts for idempotent reads that failed transiently.
    pub max_retries: u32,
    /// First backoff delay; doubles after every failed attempt.
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by the `STOREFRONT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_API_URL) {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_MS) {
            config.timeout = Duration::from_millis(parse_number(ENV_HTTP_TIMEOUT_MS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = parse_number(ENV_MAX_RETRIES, &raw)?;
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        let trimmed = endpoint.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: ENV_API_URL,
                value: endpoint,
                reason: "expected an http(s) URL".to_string(),
            });
        }
        self.endpoint = trimmed.to_string();
        Ok(self)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

fn parse_number<T: core::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: core::fmt::Display,
{
    raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: err.to_string(),
    })
}
