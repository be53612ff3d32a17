//! Domain Value Objects
//!
//! Immutable value objects shared by every tier and by callers.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`CacheItem`] | Unit stored by the memory tier |
//! | [`DistributedEnvelope`] | Serialized item in the distributed store |
//! | [`CacheKey`] | `domain:qualifier:id` key builder and checks |
//! | [`KeyPattern`] | Compiled glob over cache keys |
//! | [`CacheConfig`] | Process-wide cache configuration |
//! | [`CacheStats`] | Counter snapshot with derived hit rate |
//! | [`CacheHealth`] | Health check outcome |

/// Configuration value objects
pub mod config;
/// Distributed tier wire envelope
pub mod envelope;
/// Health reporting
pub mod health;
/// Memory tier item
pub mod item;
/// Key conventions
pub mod key;
/// Glob key patterns
pub mod pattern;
/// Statistics and cleanup reports
pub mod stats;

// Re-export commonly used value objects
pub use config::CacheConfig;
pub use envelope::DistributedEnvelope;
pub use health::{CacheHealth, HealthStatus};
pub use item::{CacheItem, CachedValue};
pub use key::CacheKey;
pub use pattern::{KeyPattern, escape_glob};
pub use stats::{CacheStats, CleanupReport};
