//! Cache configuration value object

use crate::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_CONNECT_TIMEOUT_MS,
    DEFAULT_DISTRIBUTED_PROVIDER, DEFAULT_MAX_MEMORY_ITEMS,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Process-wide cache configuration
///
/// Read once at startup and immutable afterwards. [`CacheConfig::validate`]
/// must pass before a coordinator is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the in-process memory tier
    pub memory_enabled: bool,

    /// Enable the distributed tier
    pub distributed_enabled: bool,

    /// Registered distributed provider name ("redis", "moka")
    pub distributed_provider: String,

    /// Distributed store address (e.g. `redis://127.0.0.1:6379`)
    pub distributed_endpoint: Option<String>,

    /// Prefix applied to every key in the distributed store
    pub key_prefix: String,

    /// Default TTL in seconds
    pub default_ttl_secs: u64,

    /// Maximum number of items held by the memory tier
    pub max_memory_items: usize,

    /// Interval of the background cleanup sweep in seconds
    pub cleanup_interval_secs: u64,

    /// Connect timeout for the distributed store in milliseconds
    pub connect_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_enabled: true,
            distributed_enabled: false,
            distributed_provider: DEFAULT_DISTRIBUTED_PROVIDER.to_string(),
            distributed_endpoint: None,
            key_prefix: String::new(),
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_memory_items: DEFAULT_MAX_MEMORY_ITEMS,
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
        }
    }
}

impl CacheConfig {
    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Cleanup interval as a duration
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    /// Connect timeout as a duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Check the startup invariants
    pub fn validate(&self) -> Result<()> {
        if self.default_ttl_secs == 0 {
            return Err(Error::configuration("Cache default TTL must be greater than 0"));
        }
        if self.max_memory_items == 0 {
            return Err(Error::configuration(
                "Cache max_memory_items must be greater than 0",
            ));
        }
        if self.cleanup_interval_secs == 0 {
            return Err(Error::configuration(
                "Cache cleanup interval must be greater than 0",
            ));
        }
        if !self.memory_enabled && !self.distributed_enabled {
            return Err(Error::configuration(
                "At least one cache tier must be enabled",
            ));
        }
        if self.distributed_enabled {
            if self.distributed_provider.trim().is_empty() {
                return Err(Error::configuration(
                    "Distributed provider name cannot be empty when the distributed tier is enabled",
                ));
            }
            if self.distributed_provider == "redis"
                && self
                    .distributed_endpoint
                    .as_deref()
                    .is_none_or(|endpoint| endpoint.trim().is_empty())
            {
                return Err(Error::configuration(
                    "distributed_endpoint is required for the redis provider",
                ));
            }
        }
        Ok(())
    }
}
