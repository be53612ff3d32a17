//! Redis distributed cache provider
//!
//! Shared store for multi-instance deployments.
//!
//! ## Features
//!
//! - Native per-key TTL (`SET ... PX`)
//! - Lazily established [`ConnectionManager`] that reconnects on its own
//! - Pattern listing with cursor-based `SCAN MATCH`, never `KEYS`
//! - Optional key prefix so several applications can share one database
//!
//! ## Example
//!
//! ```ignore
//! use tiercache_providers::cache::RedisCacheProvider;
//!
//! let provider = RedisCacheProvider::new("redis://localhost:6379")?
//!     .with_key_prefix("booking-app");
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError, RedisResult};
use tiercache_domain::error::{Error, Result};
use tiercache_domain::ports::DistributedCacheProvider;
use tiercache_domain::{CacheKey, escape_glob};
use tokio::sync::Mutex;

use crate::constants::{
    REDIS_DEFAULT_TIMEOUT, REDIS_DEFAULT_URI, REDIS_DELETE_BATCH_SIZE, REDIS_SCAN_BATCH_SIZE,
};

const PROVIDER_NAME: &str = "redis";

/// Redis cache provider
///
/// No connection is made until the first command. Connection failures and
/// timeouts surface as [`Error::TierUnavailable`]; any other Redis error as
/// [`Error::Cache`].
pub struct RedisCacheProvider {
    client: Client,
    endpoint: String,
    key_prefix: String,
    timeout: Duration,
    connection: Mutex<Option<ConnectionManager>>,
}

impl RedisCacheProvider {
    /// Create a provider for a connection URL (e.g. `redis://localhost:6379`)
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL: {e}"), e)
        })?;

        Ok(Self {
            client,
            endpoint: redact_endpoint(connection_string),
            key_prefix: String::new(),
            timeout: REDIS_DEFAULT_TIMEOUT,
            connection: Mutex::new(None),
        })
    }

    /// Namespace every key under `prefix`
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Bound connection setup and every command by `timeout`
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Server address with credentials removed
    pub fn server_address(&self) -> &str {
        &self.endpoint
    }

    /// Key prefix applied to stored keys
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    fn full_key(&self, key: &str) -> String {
        CacheKey::namespaced(&self.key_prefix, key)
    }

    fn strip_prefix(&self, full_key: String) -> String {
        if self.key_prefix.is_empty() {
            return full_key;
        }
        let prefix = CacheKey::namespaced(&self.key_prefix, "");
        match full_key.strip_prefix(&prefix) {
            Some(key) => key.to_string(),
            None => full_key,
        }
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let mut guard = self.connection.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = tokio::time::timeout(self.timeout, ConnectionManager::new(self.client.clone()))
            .await
            .map_err(|_| {
                Error::tier_unavailable(
                    PROVIDER_NAME,
                    format!(
                        "Connecting to {} timed out after {}ms",
                        self.endpoint,
                        self.timeout.as_millis()
                    ),
                )
            })?
            .map_err(|e| {
                Error::tier_unavailable_with_source(
                    PROVIDER_NAME,
                    format!("Failed to connect to {}: {e}", self.endpoint),
                    e,
                )
            })?;

        tracing::info!(endpoint = %self.endpoint, "connected to redis");
        *guard = Some(conn.clone());
        Ok(conn)
    }

    async fn timed<T>(&self, op: &str, command: impl Future<Output = RedisResult<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, command).await {
            Ok(result) => result.map_err(|e| map_redis_error(op, e)),
            Err(_) => Err(Error::tier_unavailable(
                PROVIDER_NAME,
                format!("Redis {op} timed out after {}ms", self.timeout.as_millis()),
            )),
        }
    }

    /// Full keys matching a glob already expressed in the stored key space
    async fn scan(&self, full_pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.connection().await?;
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = self
                .timed(
                    "SCAN",
                    redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(full_pattern)
                        .arg("COUNT")
                        .arg(REDIS_SCAN_BATCH_SIZE)
                        .query_async(&mut conn),
                )
                .await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }

    async fn delete_full_keys(&self, full_keys: &[String]) -> Result<usize> {
        if full_keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection().await?;
        let mut deleted = 0;
        for chunk in full_keys.chunks(REDIS_DELETE_BATCH_SIZE) {
            let count: usize = self.timed("DEL", conn.del(chunk)).await?;
            deleted += count;
        }
        Ok(deleted)
    }
}

#[async_trait]
impl DistributedCacheProvider for RedisCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        self.timed("GET", conn.get(self.full_key(key))).await
    }

    async fn set_json(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
        self.timed(
            "SET",
            redis::cmd("SET")
                .arg(self.full_key(key))
                .arg(value)
                .arg("PX")
                .arg(ttl_ms)
                .query_async::<()>(&mut conn),
        )
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let count: usize = self.timed("DEL", conn.del(self.full_key(key))).await?;
        Ok(count > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        self.timed("EXISTS", conn.exists(self.full_key(key))).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let full_pattern = if self.key_prefix.is_empty() {
            pattern.to_string()
        } else {
            CacheKey::namespaced(&escape_glob(&self.key_prefix), pattern)
        };
        let keys = self.scan(&full_pattern).await?;
        Ok(keys.into_iter().map(|k| self.strip_prefix(k)).collect())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize> {
        let full_keys: Vec<String> = keys.iter().map(|k| self.full_key(k)).collect();
        self.delete_full_keys(&full_keys).await
    }

    async fn clear(&self) -> Result<()> {
        if self.key_prefix.is_empty() {
            let mut conn = self.connection().await?;
            return self
                .timed("FLUSHDB", redis::cmd("FLUSHDB").query_async::<()>(&mut conn))
                .await;
        }

        let pattern = CacheKey::namespaced(&escape_glob(&self.key_prefix), "*");
        let full_keys = self.scan(&pattern).await?;
        let deleted = self.delete_full_keys(&full_keys).await?;
        tracing::debug!(prefix = %self.key_prefix, deleted, "cleared redis namespace");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = self
            .timed("PING", redis::cmd("PING").query_async(&mut conn))
            .await?;
        Ok(())
    }

    async fn size(&self) -> Result<usize> {
        if !self.key_prefix.is_empty() {
            return Ok(self.keys("*").await?.len());
        }
        let mut conn = self.connection().await?;
        self.timed("DBSIZE", redis::cmd("DBSIZE").query_async(&mut conn))
            .await
    }

    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("server", &self.endpoint)
            .field("key_prefix", &self.key_prefix)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(op: &str, e: RedisError) -> Error {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
    {
        Error::tier_unavailable_with_source(PROVIDER_NAME, format!("Redis {op} failed: {e}"), e)
    } else {
        Error::cache(format!("Redis {op} failed: {e}"))
    }
}

/// Drop `user:password@` from a connection URL
fn redact_endpoint(uri: &str) -> String {
    match (uri.split_once("://"), uri.rsplit_once('@')) {
        (Some((scheme, _)), Some((_, host))) => format!("{scheme}://{host}"),
        _ => uri.to_string(),
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use tiercache_application::ports::registry::{
    DISTRIBUTED_CACHE_PROVIDERS, DistributedProviderConfig, DistributedProviderEntry,
};

/// Factory function for creating Redis cache provider instances.
fn redis_cache_factory(
    config: &DistributedProviderConfig,
) -> std::result::Result<Arc<dyn DistributedCacheProvider>, String> {
    let uri = config.uri.as_deref().unwrap_or(REDIS_DEFAULT_URI);

    let mut provider = RedisCacheProvider::new(uri)
        .map_err(|e| format!("Failed to create Redis provider: {e}"))?;
    if let Some(prefix) = &config.key_prefix {
        provider = provider.with_key_prefix(prefix.clone());
    }
    if let Some(timeout) = config.connect_timeout {
        provider = provider.with_timeout(timeout);
    }

    Ok(Arc::new(provider))
}

#[linkme::distributed_slice(DISTRIBUTED_CACHE_PROVIDERS)]
static REDIS_PROVIDER: DistributedProviderEntry = DistributedProviderEntry {
    name: "redis",
    description: "Redis distributed cache",
    factory: redis_cache_factory,
};
