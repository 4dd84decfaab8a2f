//! Client configuration.

use std::time::Duration;

use crate::client::DEFAULT_TIMEOUT;
use crate::error::Error;

pub const BASE_URL_ENV: &str = "HTTPY_BASE_URL";
pub const TIMEOUT_SECS_ENV: &str = "HTTPY_TIMEOUT_SECS";

/// Settings for a `StandardClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for relative request URLs. Empty means none.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from the environment.
    ///
    /// Reads:
    /// - `HTTPY_BASE_URL`: base URL (default: none)
    /// - `HTTPY_TIMEOUT_SECS`: timeout in whole seconds (default: 30)
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Ok(raw) = std::env::var(TIMEOUT_SECS_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                Error::Config(format!("{TIMEOUT_SECS_ENV}={raw:?} is not a number of seconds: {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
