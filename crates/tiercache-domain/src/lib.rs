//! # tiercache domain
//!
//! Core types of the multi-tier cache: the stored item, the distributed wire
//! envelope, key conventions, configuration, statistics, the error type and
//! the port every distributed store provider implements.
//!
//! This crate has no runtime or I/O dependencies.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{CacheEntryConfig, DistributedCacheProvider};
pub use value_objects::*;
