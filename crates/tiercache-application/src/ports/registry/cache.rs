//! Distributed Cache Provider Registry
//!
//! Auto-registration system for distributed store providers.
//! Providers register themselves via `#[linkme::distributed_slice]` and are
//! discovered at runtime by name.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tiercache_domain::DistributedCacheProvider;

/// Configuration for distributed provider creation
///
/// Contains all configuration options that a provider might need.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct DistributedProviderConfig {
    /// Provider name (e.g., "redis", "moka")
    pub provider: String,
    /// Connection URI (for network stores)
    pub uri: Option<String>,
    /// Prefix applied to every stored key
    pub key_prefix: Option<String>,
    /// Connect timeout
    pub connect_timeout: Option<Duration>,
    /// Maximum number of entries (in-process providers)
    pub max_entries: Option<u64>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl DistributedProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum number of entries
    pub fn with_max_entries(mut self, max_entries: u64) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Factory signature of a registered provider
pub type DistributedProviderFactory =
    fn(&DistributedProviderConfig) -> Result<Arc<dyn DistributedCacheProvider>, String>;

/// Registry entry for distributed cache providers
pub struct DistributedProviderEntry {
    /// Unique provider name (e.g., "redis", "moka")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: DistributedProviderFactory,
}

#[linkme::distributed_slice]
pub static DISTRIBUTED_CACHE_PROVIDERS: [DistributedProviderEntry] = [..];

/// Resolve a distributed provider by name from the registry
///
/// # Returns
/// * `Ok(Arc<dyn DistributedCacheProvider>)` - Created provider instance
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_distributed_provider(
    config: &DistributedProviderConfig,
) -> Result<Arc<dyn DistributedCacheProvider>, String> {
    let provider_name = &config.provider;

    for entry in DISTRIBUTED_CACHE_PROVIDERS {
        if entry.name == provider_name {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = DISTRIBUTED_CACHE_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown distributed cache provider '{provider_name}'. Available providers: {available:?}"
    ))
}

/// List all registered distributed providers as (name, description)
pub fn list_distributed_providers() -> Vec<(&'static str, &'static str)> {
    DISTRIBUTED_CACHE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
