// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use trig_engine::EngineConfig;

/// Config file read when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "trigd.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("poll_interval must be greater than zero")]
    ZeroPollInterval,
}

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the trigger store
    pub store_dir: PathBuf,
    /// Time between timer evaluation passes
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Log to this file instead of stderr
    pub log_file: Option<PathBuf>,
    /// Tracing filter directive; takes precedence over `RUST_LOG`
    pub log_filter: Option<String>,
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("state"),
            poll_interval: Duration::from_secs(5),
            log_file: None,
            log_filter: None,
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Load config from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        if config.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
