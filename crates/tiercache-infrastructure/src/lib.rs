//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the cache.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (defaults, TOML, `TIERCACHE__*` env) |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Provider resolution and coordinator construction |
//! | [`cache`] | Background cleanup scheduler |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`constants`] | Centralized infrastructure constants |

// Link the providers so they register into the registry
extern crate tiercache_providers;

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{CacheRuntime, build_cache, init_cache};
pub use cache::CleanupScheduler;
pub use config::{AppConfig, ConfigLoader, LoggingConfig};
pub use error_ext::ErrorContext;
