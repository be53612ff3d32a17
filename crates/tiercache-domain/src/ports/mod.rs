//! Domain Port Interfaces
//!
//! Boundary contracts implemented outside the domain.
//!
//! - **providers/** - External store providers (distributed cache)

/// External provider ports
pub mod providers;

pub use providers::{CacheEntryConfig, DistributedCacheProvider};
