//! Cache Coordinator
//!
//! The single entry point callers use. Reads go memory, then distributed,
//! then miss; writes go to every enabled tier; deletes and invalidations fan
//! out to both tiers.
//!
//! ## Failure model
//!
//! Callers never see cache-internal failures. A dead distributed store makes
//! the coordinator behave as memory-only; a value that cannot be serialized
//! is still cached in memory. The only error a caller can get back is its own
//! fetch error from [`CacheCoordinator::get_or_set`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tiercache_application::CacheCoordinator;
//! use tiercache_domain::{CacheConfig, CacheEntryConfig};
//!
//! # async fn demo() -> tiercache_domain::Result<()> {
//! let cache = Arc::new(CacheCoordinator::new(&CacheConfig::default(), None)?);
//! cache
//!     .set("services:detail:42", "Haircut".to_string(), CacheEntryConfig::new().with_tag("services"))
//!     .await;
//! let name: Option<String> = cache.get("services:detail:42").await;
//! assert_eq!(name.as_deref(), Some("Haircut"));
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tiercache_domain::{
    CacheConfig, CacheEntryConfig, CacheHealth, CacheItem, CacheKey, CacheStats, CachedValue,
    CleanupReport, DistributedCacheProvider, DistributedEnvelope, HealthStatus, KeyPattern,
    Result,
};
use tracing::{debug, info, warn};

use crate::stats::StatsCollector;
use crate::tiers::{DistributedTier, MemoryLookup, MemoryTier};

/// Multi-tier cache coordinator
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct CacheCoordinator {
    memory: Option<MemoryTier>,
    distributed: Option<DistributedTier>,
    stats: StatsCollector,
    default_ttl: Duration,
    max_memory_items: usize,
}

impl CacheCoordinator {
    /// Build a coordinator from validated configuration
    ///
    /// `distributed` is the resolved store provider; it is ignored when the
    /// distributed tier is disabled.
    pub fn new(
        config: &CacheConfig,
        distributed: Option<Arc<dyn DistributedCacheProvider>>,
    ) -> Result<Self> {
        config.validate()?;

        let memory = config
            .memory_enabled
            .then(|| MemoryTier::new(config.max_memory_items));

        let distributed = match (config.distributed_enabled, distributed) {
            (true, Some(provider)) => Some(DistributedTier::new(provider)),
            (true, None) => {
                warn!(
                    provider = %config.distributed_provider,
                    "distributed tier enabled without a provider, running memory-only"
                );
                None
            }
            (false, _) => None,
        };

        Ok(Self {
            memory,
            distributed,
            stats: StatsCollector::new(),
            default_ttl: config.default_ttl(),
            max_memory_items: config.max_memory_items,
        })
    }

    /// TTL applied when an entry config does not set one
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Whether the memory tier is active
    pub fn memory_enabled(&self) -> bool {
        self.memory.is_some()
    }

    /// Whether the distributed tier is active
    pub fn distributed_enabled(&self) -> bool {
        self.distributed.is_some()
    }

    /// Name of the distributed provider, if any
    pub fn distributed_provider(&self) -> Option<&str> {
        self.distributed.as_ref().map(DistributedTier::provider_name)
    }

    /// Read a value
    ///
    /// A distributed hit is copied into memory with the entry's remaining TTL
    /// and its stored tags.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        if let Some(memory) = &self.memory {
            match memory.get::<T>(key) {
                MemoryLookup::Hit(value) => {
                    self.stats.record_hit();
                    debug!(key = %key, tier = "memory", "cache hit");
                    return Some(value);
                }
                MemoryLookup::Expired => {
                    self.stats.record_expiration();
                    debug!(key = %key, tier = "memory", "cache entry expired");
                }
                MemoryLookup::TypeMismatch => {
                    debug!(key = %key, tier = "memory", "cached value has a different type");
                }
                MemoryLookup::Miss => {}
            }
        }

        if let Some(value) = self.get_distributed::<T>(key).await {
            self.stats.record_hit();
            return Some(value);
        }

        self.stats.record_miss();
        debug!(key = %key, "cache miss");
        None
    }

    async fn get_distributed<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let distributed = self.distributed.as_ref()?;
        let envelope = distributed.get(key).await?;
        let ttl = envelope.remaining_ttl()?;
        let tags = envelope.tags.clone();

        let value = match envelope.into_value::<T>() {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "distributed cache entry does not decode to the requested type");
                return None;
            }
        };
        debug!(key = %key, tier = "distributed", "cache hit");

        if let Some(memory) = &self.memory {
            let cached: CachedValue = Arc::new(value.clone());
            let report = memory.insert(CacheItem::new(key, cached, ttl, tags));
            self.stats.record_cleanup(report);
        }
        Some(value)
    }

    /// Write a value to every enabled tier
    ///
    /// Returns false when the key is invalid, the TTL is zero, or no tier
    /// accepted the write.
    pub async fn set<T>(&self, key: &str, value: T, config: CacheEntryConfig) -> bool
    where
        T: Serialize + Send + Sync + 'static,
    {
        if let Err(e) = CacheKey::validate_key(key) {
            warn!(key = %key, error = %e, "rejecting cache write");
            return false;
        }
        let ttl = config.effective_ttl(self.default_ttl);
        if ttl.is_zero() {
            warn!(key = %key, "rejecting cache write with zero TTL");
            return false;
        }

        // Encode before the value moves into the memory tier
        let envelope = self.distributed.as_ref().map(|_| {
            DistributedEnvelope::from_value(&value, config.tags.clone(), ttl)
        });

        let memory_ok = match &self.memory {
            Some(memory) => {
                let cached: CachedValue = Arc::new(value);
                let report = memory.insert(CacheItem::new(key, cached, ttl, config.tags.clone()));
                self.stats.record_cleanup(report);
                true
            }
            None => false,
        };

        let distributed_ok = match (&self.distributed, envelope) {
            (Some(distributed), Some(Ok(envelope))) => distributed.set(key, &envelope, ttl).await,
            (Some(_), Some(Err(e))) => {
                warn!(key = %key, error = %e, "value not serializable, cached in memory only");
                false
            }
            _ => false,
        };

        self.stats.record_set();
        debug!(key = %key, ttl_secs = ttl.as_secs(), memory_ok, distributed_ok, "cache set");
        memory_ok || distributed_ok
    }

    /// Remove a key from every tier
    ///
    /// Idempotent; always returns true.
    pub async fn delete(&self, key: &str) -> bool {
        if let Some(memory) = &self.memory {
            memory.remove(key);
        }
        if let Some(distributed) = &self.distributed {
            distributed.delete(key).await;
        }
        self.stats.record_delete();
        debug!(key = %key, "cache delete");
        true
    }

    /// Whether any tier holds a live entry, without touching stats
    pub async fn exists(&self, key: &str) -> bool {
        if self.memory.as_ref().is_some_and(|m| m.contains(key)) {
            return true;
        }
        match &self.distributed {
            Some(distributed) => distributed.exists(key).await,
            None => false,
        }
    }

    /// Read a value, computing and storing it on a miss
    ///
    /// `fetch` runs at most once per call. Its error is returned unchanged
    /// and nothing is cached. Concurrent misses on the same key each call
    /// their own `fetch`.
    pub async fn get_or_set<T, E, F, Fut>(
        &self,
        key: &str,
        config: CacheEntryConfig,
        fetch: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(value) = self.get::<T>(key).await {
            return Ok(value);
        }

        let value = fetch().await?;
        self.set(key, value.clone(), config).await;
        Ok(value)
    }

    /// Remove every entry carrying at least one of `tags`
    ///
    /// Returns the number of distinct keys removed across both tiers. Keys
    /// dropped from memory are also deleted from the distributed tier by name.
    /// Beyond those, a distributed key counts as tagged with `t` when `t` is
    /// one of its colon-delimited segments.
    pub async fn invalidate_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> usize {
        if tags.is_empty() {
            return 0;
        }
        let memory_keys = self
            .memory
            .as_ref()
            .map(|memory| memory.remove_by_tags(tags))
            .unwrap_or_default();
        if let Some(distributed) = &self.distributed {
            // Tagged keys need not carry the tag in their name
            distributed.delete_keys(&memory_keys).await;
        }

        let mut removed: BTreeSet<String> = memory_keys.into_iter().collect();
        if let Some(distributed) = &self.distributed {
            removed.extend(distributed.delete_by_tags(tags).await);
        }

        let tag_list: Vec<&str> = tags.iter().map(AsRef::as_ref).collect();
        info!(tags = ?tag_list, removed = removed.len(), "invalidated cache by tags");
        removed.len()
    }

    /// Remove every key matching a glob (`*`, `?`, `\` escapes)
    ///
    /// Returns the number of distinct keys removed across both tiers; an
    /// invalid pattern removes nothing.
    pub async fn invalidate_by_pattern(&self, pattern: &str) -> usize {
        let compiled = match KeyPattern::new(pattern) {
            Ok(compiled) => compiled,
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "ignoring invalid invalidation pattern");
                return 0;
            }
        };

        let mut removed: BTreeSet<String> = BTreeSet::new();
        if let Some(memory) = &self.memory {
            removed.extend(memory.remove_matching(&compiled));
        }
        if let Some(distributed) = &self.distributed {
            removed.extend(distributed.delete_matching(pattern).await);
        }

        info!(pattern = %pattern, removed = removed.len(), "invalidated cache by pattern");
        removed.len()
    }

    /// Empty every tier
    ///
    /// Returns false when the distributed flush did not go through.
    pub async fn clear(&self) -> bool {
        let dropped = self.memory.as_ref().map_or(0, MemoryTier::clear);
        let flushed = match &self.distributed {
            Some(distributed) => distributed.clear().await,
            None => true,
        };
        info!(memory_dropped = dropped, distributed_flushed = flushed, "cache cleared");
        flushed
    }

    /// Counter snapshot with tier occupancy
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(
            self.memory.as_ref().map_or(0, MemoryTier::len),
            self.max_memory_items,
            self.distributed.is_some(),
            self.distributed
                .as_ref()
                .is_some_and(DistributedTier::is_connected),
        )
    }

    /// Zero every counter
    pub fn reset_stats(&self) {
        self.stats.reset();
        info!("cache statistics reset");
    }

    /// Probe the tiers
    ///
    /// Memory-only deployments are always healthy; an unreachable distributed
    /// store reports degraded. A reachable store also reports its key count.
    pub async fn health_check(&self) -> CacheHealth {
        let start = Instant::now();
        let memory_enabled = self.memory.is_some();

        let (status, detail, connected, provider, entries) = match &self.distributed {
            None => (
                HealthStatus::Healthy,
                "memory tier only".to_string(),
                false,
                None,
                None,
            ),
            Some(distributed) => {
                let provider = distributed.provider_name().to_string();
                if distributed.ping().await {
                    (
                        HealthStatus::Healthy,
                        format!("distributed tier '{provider}' reachable"),
                        true,
                        Some(provider),
                        distributed.size().await,
                    )
                } else {
                    (
                        HealthStatus::Degraded,
                        format!("distributed tier '{provider}' unreachable, serving from memory"),
                        false,
                        Some(provider),
                        None,
                    )
                }
            }
        };

        CacheHealth {
            status,
            detail,
            memory_enabled,
            distributed_enabled: self.distributed.is_some(),
            distributed_connected: connected,
            provider,
            distributed_entries: entries,
            response_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// One cleanup sweep: purge expired memory items, then re-check capacity
    pub fn run_cleanup(&self) -> CleanupReport {
        let Some(memory) = &self.memory else {
            return CleanupReport::default();
        };
        let report = CleanupReport {
            expired: memory.purge_expired(),
            evicted: memory.enforce_capacity(),
        };
        self.stats.record_cleanup(report);
        debug!(expired = report.expired, evicted = report.evicted, "cache cleanup sweep");
        report
    }
}
