//! Provider Ports

/// Distributed cache provider port
pub mod cache;

pub use cache::{CacheEntryConfig, DistributedCacheProvider};
