//! Distributed Store Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`MokaCacheProvider`] | Local | In-process stand-in for a shared store |
//! | [`RedisCacheProvider`] | Distributed | Redis-backed for multi-instance |
//!
//! ## Provider Selection Guide
//!
//! - **Single Instance / Testing**: `MokaCacheProvider`
//! - **Multi Instance**: `RedisCacheProvider`

#[cfg(feature = "cache-moka")]
pub mod moka;
#[cfg(feature = "cache-redis")]
pub mod redis;

#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheProvider;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheProvider;
