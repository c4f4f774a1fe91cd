//! Startup configuration read from the environment.

use std::time::Duration;

use thiserror::Error;
use todos_core::DEFAULT_BASE_URL;

pub const API_URL_VAR: &str = "TODOS_API_URL";
pub const TIMEOUT_VAR: &str = "TODOS_HTTP_TIMEOUT_SECS";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILTER: &str = "todos_app=info,todos_core=info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{API_URL_VAR} must be an http(s) URL, got '{0}'")]
    InvalidApiUrl(String),

    #[error("{TIMEOUT_VAR} must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub http_timeout: Duration,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidApiUrl(url));
            }
            config.api_url = url;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?;
            config.http_timeout = Duration::from_secs(secs);
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}
