//! Application configuration
//!
//! [`AppConfig`] is the root of the TOML file and of the `TIERCACHE__*`
//! environment overrides. [`loader::ConfigLoader`] merges and validates it.

pub mod loader;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
pub use tiercache_domain::CacheConfig;

use crate::constants::DEFAULT_LOG_LEVEL;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cache tiers
    pub cache: CacheConfig,
    /// Logging
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stderr
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

pub use loader::ConfigLoader;
