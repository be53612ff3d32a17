//! Cache tiers
//!
//! - [`MemoryTier`] - bounded in-process map with lazy expiry and eviction
//! - [`DistributedTier`] - error-absorbing adapter over a shared store

/// Distributed tier adapter
pub mod distributed;
/// In-process memory tier
pub mod memory;

pub use distributed::DistributedTier;
pub use memory::{MemoryLookup, MemoryTier};
