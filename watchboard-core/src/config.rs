//! Dashboard configuration: the watch-list, refresh cadence, and provider knobs.
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file at all) yields the stock Swiss watch-list refreshed every
//! minute.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("watch-list is empty")]
    EmptyWatchlist,

    #[error("watch-list contains a blank symbol")]
    BlankSymbol,

    #[error("watch-list contains duplicate symbol '{0}'")]
    DuplicateSymbol(String),

    #[error("refresh interval must be at least one second")]
    IntervalTooShort,

    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WatchConfig {
    /// Ordered symbols to track; display order follows this list.
    pub watchlist: Vec<String>,

    /// Seconds between cycle triggers, measured trigger to trigger.
    pub refresh_interval_secs: u64,

    /// Upper bound on concurrent fetches within one cycle.
    pub max_concurrency: usize,

    /// Quote provider settings
    pub provider: ProviderConfig,
}

/// HTTP provider settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub breaker_cooldown_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            watchlist: [
                "SLHN.SW", "ZURN.SW", "SREN.SW", "NOVN.SW", "HOLN.SW", "NESN.SW", "UHR.SW",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            refresh_interval_secs: 60,
            max_concurrency: 8,
            provider: ProviderConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            base_delay_ms: 500,
            breaker_cooldown_secs: 30 * 60,
        }
    }
}

impl WatchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: WatchConfig = toml::from_str(s)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load from a file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Serialize back to TOML (used by `watchboard-cli config`).
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn normalize(&mut self) {
        for symbol in &mut self.watchlist {
            let trimmed = symbol.trim();
            if trimmed.len() != symbol.len() {
                *symbol = trimmed.to_string();
            }
        }
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watchlist.is_empty() {
            return Err(ConfigError::EmptyWatchlist);
        }
        let mut seen = HashSet::new();
        for symbol in &self.watchlist {
            if symbol.is_empty() {
                return Err(ConfigError::BlankSymbol);
            }
            if !seen.insert(symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol(symbol.clone()));
            }
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::IntervalTooShort);
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn breaker_cooldown(&self) -> Duration {
        Duration::from_secs(self.provider.breaker_cooldown_secs)
    }
}
