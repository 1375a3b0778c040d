//! Loader configuration
//!
//! Where the adjustment table lives, where the pointer to the remote skill
//! database is published, and how long a fetch may take before it counts as
//! unavailable.

use crate::core::error::{DbError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Published pointer to the current community skill database URL
pub const DEFAULT_POINTER_URL: &str =
    "https://raw.githubusercontent.com/Elysia-ff/FFXIV_RotationHelper-resources/master/Output/dburl.txt";

/// Default location of the local adjustment table
pub const DEFAULT_ACTION_TABLE_PATH: &str = "data/ActionTable.csv";

/// Upper bound accepted for `fetch_timeout_secs`
const MAX_FETCH_TIMEOUT_SECS: u64 = 120;

/// Configuration for loading the skill database
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// URL of the plain-text pointer resource
    ///
    /// Its trimmed body is the URL of the JSON skill database. The database
    /// moves between releases, the pointer does not.
    pub pointer_url: String,

    /// Path to the CSV adjustment table (`ClassName,ActionName,GameIdx,DBIdx`)
    pub action_table_path: PathBuf,

    /// Deadline applied to each network fetch, in seconds
    ///
    /// Expiry is reported as `SourceUnavailable`.
    pub fetch_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            pointer_url: DEFAULT_POINTER_URL.into(),
            action_table_path: PathBuf::from(DEFAULT_ACTION_TABLE_PATH),
            fetch_timeout_secs: 15,
        }
    }
}

impl DbConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DbConfig =
            toml::from_str(content).map_err(|e| DbError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply environment overrides on top of this config
    ///
    /// Optional: ROTATION_DB_POINTER_URL
    /// Optional: ROTATION_DB_ACTION_TABLE
    /// Optional: ROTATION_DB_FETCH_TIMEOUT_SECS
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("ROTATION_DB_POINTER_URL") {
            self.pointer_url = url;
        }
        if let Ok(path) = std::env::var("ROTATION_DB_ACTION_TABLE") {
            self.action_table_path = PathBuf::from(path);
        }
        if let Ok(secs) = std::env::var("ROTATION_DB_FETCH_TIMEOUT_SECS") {
            self.fetch_timeout_secs = secs.trim().parse().map_err(|_| {
                DbError::InvalidConfig(format!(
                    "ROTATION_DB_FETCH_TIMEOUT_SECS is not a number: {}",
                    secs
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Deadline for a single fetch
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.pointer_url.trim().is_empty() {
            return Err(DbError::InvalidConfig("pointer_url is empty".into()));
        }

        if self.fetch_timeout_secs == 0 || self.fetch_timeout_secs > MAX_FETCH_TIMEOUT_SECS {
            return Err(DbError::InvalidConfig(format!(
                "fetch_timeout_secs ({}) should be within 1..={}",
                self.fetch_timeout_secs, MAX_FETCH_TIMEOUT_SECS
            )));
        }

        Ok(())
    }
}
