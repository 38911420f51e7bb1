//! Configuration: tunables from `~/.config/cuhier/config.toml` and
//! credentials from the environment (see [`credentials`]).

mod credentials;

pub use credentials::{
    credentials_from_lookup, load_credentials, parse_space_targets, Credentials, SpaceTarget,
    API_KEY_VAR, SPACE_URLS_VAR, TEAM_ID_VAR,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff on transient failures.
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
    /// Wait in seconds after a rate-limit (429) response.
    pub throttle_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay_secs: 0.5,
            max_delay_secs: 30,
            throttle_delay_secs: 60,
        }
    }
}

/// Global configuration loaded from `~/.config/cuhier/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuhierConfig {
    /// ClickUp API root.
    pub base_url: String,
    /// Pause between task pages, in milliseconds.
    pub page_delay_ms: u64,
    /// Remove lists that stay empty after the linking pass.
    pub delete_empty_lists: bool,
    /// Custom field holding a task's nesting level.
    pub depth_field: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
}

impl Default for CuhierConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.clickup.com/api/v2".to_string(),
            page_delay_ms: 600,
            delete_empty_lists: true,
            depth_field: "M Path Depth 2".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 60,
            retry: None,
        }
    }
}

impl CuhierConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn retry_or_default(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cuhier")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CuhierConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<CuhierConfig> {
    if !path.exists() {
        let default_cfg = CuhierConfig::default();
        let toml = default_cfg.to_toml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: CuhierConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
