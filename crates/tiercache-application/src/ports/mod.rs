//! Port Interfaces
//!
//! - **registry/** - Auto-registration of distributed store providers
//!
//! The provider port itself lives in the domain crate and is re-exported here.

/// Provider registry for dynamic provider discovery
pub mod registry;

pub use registry::{
    DistributedProviderConfig, DistributedProviderEntry, list_distributed_providers,
    resolve_distributed_provider,
};
pub use tiercache_domain::ports::{CacheEntryConfig, DistributedCacheProvider};
