//! # tiercache - Distributed Store Providers
//!
//! Implementations of [`DistributedCacheProvider`], the port the distributed
//! cache tier talks to. Every provider registers itself into the application
//! layer's registry, so linking this crate is enough to make them resolvable
//! by name.
//!
//! | Provider | Name | Feature |
//! |----------|------|---------|
//! | [`cache::RedisCacheProvider`] | `redis` | `cache-redis` |
//! | [`cache::MokaCacheProvider`] | `moka` | `cache-moka` |
//!
//! ```toml
//! [dependencies]
//! tiercache-providers = { version = "0.1", default-features = false, features = ["cache-moka"] }
//! ```

pub use tiercache_domain::error::{Error, Result};
pub use tiercache_domain::ports::DistributedCacheProvider;

/// Provider-specific constants
pub mod constants;

/// Distributed store provider implementations
pub mod cache;
