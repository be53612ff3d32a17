//! Provider Constants
//!
//! Constants specific to provider implementations. Domain constants live in
//! `tiercache-domain`.

use std::time::Duration;

// ============================================================================
// REDIS PROVIDER CONSTANTS
// ============================================================================

/// Redis URI used when none is configured
pub const REDIS_DEFAULT_URI: &str = "redis://127.0.0.1:6379";

/// Connect and command timeout when none is configured
pub const REDIS_DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// `COUNT` hint passed to each `SCAN` call
pub const REDIS_SCAN_BATCH_SIZE: usize = 500;

/// Maximum number of keys per `DEL` call
pub const REDIS_DELETE_BATCH_SIZE: usize = 500;

// ============================================================================
// MOKA PROVIDER CONSTANTS
// ============================================================================

/// Default maximum number of entries held by the Moka provider
pub const MOKA_DEFAULT_MAX_ENTRIES: u64 = 10_000;
