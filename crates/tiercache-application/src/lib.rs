//! # tiercache application layer
//!
//! Orchestrates the cache tiers behind [`CacheCoordinator`]:
//!
//! - **tiers/** - memory tier and distributed tier adapter
//! - **stats** - hit/miss counters
//! - **coordinator** - read-through, write-through, invalidation, health
//! - **use_cases/** - domain invalidation triggers
//! - **ports/** - distributed provider registry
//!
//! This crate depends only on the domain crate. Concrete store providers live
//! in `tiercache-providers` and register themselves into
//! [`ports::registry::DISTRIBUTED_CACHE_PROVIDERS`].

/// Cache coordinator
pub mod coordinator;
/// Port interfaces and provider registry
pub mod ports;
/// Statistics collection
pub mod stats;
/// Cache tiers
pub mod tiers;
/// Domain use cases
pub mod use_cases;

pub use coordinator::CacheCoordinator;
pub use stats::StatsCollector;
pub use tiers::{DistributedTier, MemoryLookup, MemoryTier};
pub use use_cases::CacheInvalidationService;
