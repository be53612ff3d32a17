//! Use Cases
//!
//! Domain-triggered invalidation entry points used by the service layer.

/// Domain invalidation triggers
pub mod invalidation;

pub use invalidation::CacheInvalidationService;
