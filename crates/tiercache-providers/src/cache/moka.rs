//! Moka in-process store provider
//!
//! Stand-in for the shared store in single-node deployments and tests. It
//! speaks the same port as Redis, including per-key TTL and glob listing,
//! but its contents die with the process.
//!
//! ## Example
//!
//! ```ignore
//! use tiercache_providers::cache::MokaCacheProvider;
//!
//! let provider = MokaCacheProvider::with_capacity(10_000);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tiercache_domain::KeyPattern;
use tiercache_domain::error::Result;
use tiercache_domain::ports::DistributedCacheProvider;

use crate::constants::MOKA_DEFAULT_MAX_ENTRIES;

#[derive(Debug, Clone)]
struct StoredValue {
    json: Arc<str>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based in-process store provider
#[derive(Clone)]
pub struct MokaCacheProvider {
    cache: Cache<String, StoredValue>,
    max_entries: u64,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheProvider {
    /// Create a provider with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(MOKA_DEFAULT_MAX_ENTRIES)
    }

    /// Create a provider holding at most `max_entries` entries
    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache, max_entries }
    }

    /// Maximum number of entries
    pub fn max_entries(&self) -> u64 {
        self.max_entries
    }
}

#[async_trait]
impl DistributedCacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .cache
            .get(key)
            .await
            .map(|stored| stored.json.to_string()))
    }

    async fn set_json(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let stored = StoredValue {
            json: Arc::from(value),
            ttl: ttl.max(Duration::from_millis(1)),
        };
        self.cache.insert(key.to_string(), stored).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let pattern = KeyPattern::new(pattern)?;
        let mut keys: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| pattern.matches(key))
            .map(|(key, _)| key.as_ref().clone())
            .collect();
        keys.sort_unstable();
        Ok(keys)
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize> {
        let mut deleted = 0;
        for key in keys {
            if self.cache.remove(key).await.is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn size(&self) -> Result<usize> {
        // Run pending tasks to ensure entry_count is accurate
        self.cache.run_pending_tasks().await;
        Ok(usize::try_from(self.cache.entry_count()).unwrap_or(usize::MAX))
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("max_entries", &self.max_entries)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use tiercache_application::ports::registry::{
    DISTRIBUTED_CACHE_PROVIDERS, DistributedProviderConfig, DistributedProviderEntry,
};

#[linkme::distributed_slice(DISTRIBUTED_CACHE_PROVIDERS)]
static MOKA_PROVIDER: DistributedProviderEntry = DistributedProviderEntry {
    name: "moka",
    description: "Moka in-process store (single node)",
    factory: |config: &DistributedProviderConfig| {
        let provider = match config.max_entries {
            Some(max_entries) => MokaCacheProvider::with_capacity(max_entries),
            None => MokaCacheProvider::new(),
        };
        Ok(Arc::new(provider))
    },
};
