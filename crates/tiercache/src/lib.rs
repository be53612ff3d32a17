//! # tiercache
//!
//! Multi-tier cache coordinator: an in-process memory tier in front of an
//! optional distributed store (Redis), with tag and pattern invalidation,
//! TTL expiry, hit-count eviction, statistics and health reporting.
//!
//! ## Example
//!
//! ```no_run
//! use tiercache::{CacheConfig, CacheEntryConfig, build_cache};
//!
//! # async fn demo() -> tiercache::Result<()> {
//! let cache = build_cache(&CacheConfig::default())?;
//!
//! let services = vec!["cut".to_string(), "color".to_string()];
//! cache
//!     .set("services:list:all", services, CacheEntryConfig::new().with_tag("services"))
//!     .await;
//! let services: Option<Vec<String>> = cache.get("services:list:all").await;
//!
//! cache.invalidate_by_tags(&["services"]).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - value objects, errors and the distributed store port
//! - `application` - coordinator, tiers, statistics and invalidation use cases
//! - `infrastructure` - configuration, logging, bootstrap and cleanup scheduling
//! - `cli` - the `tiercache` command

/// Domain layer - value objects, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use tiercache_domain::*;
}

/// Application layer - coordinator and use cases
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use tiercache_application::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use tiercache_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{CacheCoordinator, CacheInvalidationService};
pub use infrastructure::{AppConfig, CacheRuntime, ConfigLoader, build_cache, init_cache};
