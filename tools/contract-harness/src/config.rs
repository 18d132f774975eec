//! Contract harness configuration loaded from environment variables.

use std::path::PathBuf;

use rincon_core::config::Config;
use serde::Deserialize;

/// Settings read from `CONTRACT_*` after `dotenv::dotenv().ok()`. Command-line
/// flags win over these.
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessConfig {
    /// Backend root (`CONTRACT_BASE_URL`).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Directory holding `http/` (`CONTRACT_DIR`). Found by walking up from
    /// the crate when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Per-request connect and read timeout (`CONTRACT_TIMEOUT_SECS`).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fixtures in flight at once (`CONTRACT_CONCURRENCY`).
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_concurrency() -> usize {
    1
}

impl Config for HarnessConfig {
    const PREFIX: &'static str = "CONTRACT_";
}
