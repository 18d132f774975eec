use std::time::Duration;

use serde::Deserialize;

use rincon_core::config::Config;
use rincon_core::http::DEFAULT_TIMEOUT;

/// Storefront client configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontConfig {
    /// Backend root, without a trailing `/api`. Env var: `RINCON_BASE_URL`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connect and read timeout in seconds (default 30). Env var: `RINCON_TIMEOUT_SECS`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Config for StorefrontConfig {
    const PREFIX: &'static str = "RINCON_";
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StorefrontConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Replace the base URL when one was given on the command line.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }
}
