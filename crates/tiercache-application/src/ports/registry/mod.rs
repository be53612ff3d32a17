//! Provider Registry System
//!
//! Auto-registration infrastructure for distributed store providers, built on
//! `linkme` distributed slices.
//!
//! ```text
//! 1. Provider defines:  #[linkme::distributed_slice(DISTRIBUTED_CACHE_PROVIDERS)]
//!                       static ENTRY: DistributedProviderEntry = ...
//! 2. Registry declares: pub static DISTRIBUTED_CACHE_PROVIDERS: [Entry] = [..]
//! 3. Config selects:    distributed_provider = "redis" -> RedisCacheProvider
//! ```

/// Distributed cache provider registry
pub mod cache;

pub use cache::{
    DISTRIBUTED_CACHE_PROVIDERS, DistributedProviderConfig, DistributedProviderEntry,
    DistributedProviderFactory, list_distributed_providers, resolve_distributed_provider,
};
