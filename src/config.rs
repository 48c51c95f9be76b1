//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use tracing::warn;

use crate::net::client::RefreshPolicy;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CREDENTIALS_PATH: &str = ".meetpoint/credentials.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials_path: PathBuf,
    pub timeouts: Timeouts,
    pub refresh_policy: RefreshPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            timeouts: Timeouts::default(),
            refresh_policy: RefreshPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `MEETPOINT_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `MEETPOINT_CREDENTIALS_PATH`: default `.meetpoint/credentials.json`
    /// - `MEETPOINT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `MEETPOINT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `MEETPOINT_REFRESH_POLICY`: `per_call` (default) or `single_flight`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for an unknown refresh policy.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(
            &std::env::var("MEETPOINT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned()),
        );
        let credentials_path = std::env::var("MEETPOINT_CREDENTIALS_PATH")
            .map_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_PATH), PathBuf::from);
        let timeouts = Timeouts {
            request_secs: env_parse_u64("MEETPOINT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("MEETPOINT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let refresh_policy = match std::env::var("MEETPOINT_REFRESH_POLICY") {
            Ok(raw) => parse_refresh_policy(Some(&raw))?,
            Err(_) => RefreshPolicy::default(),
        };

        Ok(Self { base_url, credentials_path, timeouts, refresh_policy })
    }

    /// Override the base URL when a value is given (e.g. from a CLI flag).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = normalize_base_url(&url);
        }
        self
    }

    /// Override the credentials file when a value is given.
    #[must_use]
    pub fn with_credentials_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.credentials_path = path;
        }
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    raw.trim().parse::<u64>().unwrap_or_else(|e| {
        warn!(key, value = %raw, error = %e, default, "ignoring unparsable number");
        default
    })
}

fn parse_refresh_policy(raw: Option<&str>) -> Result<RefreshPolicy, ConfigError> {
    match raw.unwrap_or("per_call") {
        "per_call" => Ok(RefreshPolicy::PerCall),
        "single_flight" => Ok(RefreshPolicy::SingleFlight),
        other => Err(ConfigError::Parse(format!(
            "unknown MEETPOINT_REFRESH_POLICY '{other}' (expected 'per_call' or 'single_flight')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
