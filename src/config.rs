//! Configuration management for the Northwind dashboard.
//!
//! Handles loading configuration from TOML files. Every field has a built-in
//! default, so a missing file is the same as an empty one.

use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Relative location of the sample store.
pub const DEFAULT_STORE_PATH: &str = "data/Northwind_small.sqlite";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backing store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Dashboard page settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Backing store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite data file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Per-query timeout in seconds. Zero disables the timeout.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_query_timeout_secs() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Returns the query timeout, or `None` when disabled.
    pub fn query_timeout(&self) -> Option<Duration> {
        match self.query_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Dashboard page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// How many countries the country filter selects initially.
    #[serde(default = "default_country_count")]
    pub default_country_count: usize,
}

fn default_country_count() -> usize {
    5
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_country_count: default_country_count(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("northwind-dash")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DashError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            DashError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
