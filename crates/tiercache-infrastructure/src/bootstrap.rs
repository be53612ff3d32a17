//! Cache bootstrap
//!
//! Turns configuration into a running cache: resolves the distributed store
//! provider from the registry, builds the coordinator, probes the tiers once
//! and prepares the cleanup scheduler.
//!
//! ```text
//! AppConfig -> DistributedProviderConfig -> linkme registry -> Arc<dyn DistributedCacheProvider>
//!           -> CacheCoordinator -> CleanupScheduler
//! ```

use std::sync::Arc;

use tiercache_application::CacheCoordinator;
use tiercache_application::ports::registry::{
    DistributedProviderConfig, resolve_distributed_provider,
};
use tiercache_domain::error::{Error, Result};
use tiercache_domain::{CacheConfig, CacheHealth, DistributedCacheProvider};
use tracing::info;

use crate::cache::CleanupScheduler;
use crate::config::AppConfig;
use crate::constants::HEALTH_COMPONENT_CACHE;
use crate::logging::log_health_check;

/// A built cache together with its maintenance task
#[derive(Debug)]
pub struct CacheRuntime {
    /// Shared coordinator
    pub cache: Arc<CacheCoordinator>,
    /// Background cleanup, not yet started
    pub scheduler: CleanupScheduler,
}

/// Registry config for the configured distributed provider
pub fn distributed_provider_config(config: &CacheConfig) -> DistributedProviderConfig {
    let mut registry_config = DistributedProviderConfig::new(config.distributed_provider.clone())
        .with_connect_timeout(config.connect_timeout());
    if let Some(endpoint) = &config.distributed_endpoint {
        registry_config = registry_config.with_uri(endpoint.clone());
    }
    if !config.key_prefix.is_empty() {
        registry_config = registry_config.with_key_prefix(config.key_prefix.clone());
    }
    registry_config
}

/// Resolve the distributed provider, `None` when the tier is disabled
pub fn resolve_provider(config: &CacheConfig) -> Result<Option<Arc<dyn DistributedCacheProvider>>> {
    if !config.distributed_enabled {
        return Ok(None);
    }
    resolve_distributed_provider(&distributed_provider_config(config))
        .map(Some)
        .map_err(Error::configuration)
}

/// Build a coordinator from cache configuration
///
/// Configuration problems and unknown providers are fatal.
pub fn build_cache(config: &CacheConfig) -> Result<Arc<CacheCoordinator>> {
    config.validate()?;
    let provider = resolve_provider(config)?;
    let cache = CacheCoordinator::new(config, provider)?;
    info!(
        memory = cache.memory_enabled(),
        distributed = cache.distributed_provider().unwrap_or("disabled"),
        default_ttl_secs = cache.default_ttl().as_secs(),
        "cache coordinator built"
    );
    Ok(Arc::new(cache))
}

/// Run a health check and log its outcome
pub async fn probe_cache(cache: &CacheCoordinator) -> CacheHealth {
    let health = cache.health_check().await;
    log_health_check(
        HEALTH_COMPONENT_CACHE,
        health.is_healthy(),
        Some(health.detail.as_str()),
    );
    health
}

/// Build the cache, probe it once, and prepare the cleanup scheduler
///
/// A degraded distributed tier is not fatal; the cache starts memory-only.
pub async fn init_cache(config: &AppConfig) -> Result<CacheRuntime> {
    let cache = build_cache(&config.cache)?;
    probe_cache(&cache).await;
    let scheduler = CleanupScheduler::new(Arc::clone(&cache), config.cache.cleanup_interval());
    Ok(CacheRuntime { cache, scheduler })
}
