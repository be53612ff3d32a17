//! Distributed Cache Provider Port
//!
//! Port for network-backed key/value stores with native per-key TTL. The
//! coordinator never talks to a store directly; it goes through an adapter
//! that turns every provider error into "tier unavailable".
//!
//! ## Provider Pattern
//!
//! Implementations register themselves in the provider registry of the
//! application layer and are resolved by name from configuration.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache Entry Configuration
///
/// Configures how an entry is stored: TTL (falls back to the coordinator's
/// default) and the invalidation tags it belongs to.
///
/// # Example
///
/// ```
/// use tiercache_domain::CacheEntryConfig;
/// use std::time::Duration;
///
/// let config = CacheEntryConfig::new()
///     .with_ttl(Duration::from_secs(600))
///     .with_tag("services");
/// assert_eq!(config.effective_ttl(Duration::from_secs(60)), Duration::from_secs(600));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryConfig {
    /// Time to live for the cache entry
    pub ttl: Option<Duration>,
    /// Invalidation groups of the entry
    pub tags: Vec<String>,
}

impl CacheEntryConfig {
    /// Create a config using the default TTL and no tags
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TTL for the cache entry
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set TTL in seconds
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = Some(Duration::from_secs(secs));
        self
    }

    /// Add one tag
    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add several tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Get the effective TTL, falling back to `default`
    pub fn effective_ttl(&self, default: Duration) -> Duration {
        self.ttl.unwrap_or(default)
    }
}

/// Distributed Cache Provider Port
///
/// Contract for shared key/value stores. Values are opaque JSON strings; TTL
/// is enforced by the store itself.
///
/// # Implementations
///
/// - **Redis**: network store shared by every instance
/// - **Moka**: in-process stand-in for single-node deployments and tests
#[async_trait]
pub trait DistributedCacheProvider: Send + Sync + std::fmt::Debug {
    /// Get the stored string for a key, `None` when absent or expired
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Store a string under a key with a TTL
    async fn set_json(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Delete a key; true if it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Check if a key exists and hasn't expired
    async fn exists(&self, key: &str) -> Result<bool>;

    /// List keys matching a glob (`*`, `?`, `\` escapes)
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// Delete several keys at once; returns how many existed
    async fn delete_many(&self, keys: &[String]) -> Result<usize>;

    /// Remove every key owned by this provider
    async fn clear(&self) -> Result<()>;

    /// Round-trip probe used by health checks
    async fn ping(&self) -> Result<()>;

    /// Number of keys owned by this provider
    async fn size(&self) -> Result<usize>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
