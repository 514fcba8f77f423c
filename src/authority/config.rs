//! Authority configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://shopinobackend.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_VALIDATE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorityTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
    /// Upper bound on a check-auth round trip during session initialization.
    pub validate_secs: u64,
}

impl AuthorityTimeouts {
    #[must_use]
    pub fn validate(&self) -> Duration {
        Duration::from_secs(self.validate_secs)
    }
}

impl Default for AuthorityTimeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            validate_secs: DEFAULT_VALIDATE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityConfig {
    pub base_url: String,
    pub timeouts: AuthorityTimeouts,
}

impl AuthorityConfig {
    /// Config pointing at `base_url` with default timeouts.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), timeouts: AuthorityTimeouts::default() }
    }

    /// Build typed authority config from environment variables.
    ///
    /// Optional:
    /// - `SHOPINO_API_BASE_URL`: default `https://shopinobackend.onrender.com`
    /// - `SHOPINO_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SHOPINO_CONNECT_TIMEOUT_SECS`: default 10
    /// - `SHOPINO_VALIDATE_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("SHOPINO_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let timeouts = AuthorityTimeouts {
            request_secs: env_parse_u64("SHOPINO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("SHOPINO_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            validate_secs: env_parse_u64("SHOPINO_VALIDATE_TIMEOUT_SECS", DEFAULT_VALIDATE_TIMEOUT_SECS),
        };
        Self { base_url: normalize_base_url(&base_url), timeouts }
    }

    /// Same config aimed at a different backend.
    #[must_use]
    pub fn with_base_url(self, base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), ..self }
    }
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
