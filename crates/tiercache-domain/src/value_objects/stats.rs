//! Cache statistics and cleanup reports

use serde::{Deserialize, Serialize};

/// Cache Operation Statistics
///
/// Point-in-time snapshot of the coordinator counters plus derived values.
///
/// # Example
///
/// ```
/// use tiercache_domain::value_objects::CacheStats;
///
/// let stats = CacheStats { hits: 3, misses: 2, ..Default::default() };
/// assert!((stats.calculate_hit_rate() - 0.6).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    /// Number of cache hits (either tier)
    pub hits: u64,
    /// Number of full misses
    pub misses: u64,
    /// Number of `set` calls (including fetch-through writes)
    pub sets: u64,
    /// Number of `delete` calls
    pub deletes: u64,
    /// Memory items removed by the capacity bound
    pub evictions: u64,
    /// Memory items removed because their TTL elapsed
    pub expirations: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
    /// Current number of memory items
    pub memory_entries: usize,
    /// Configured memory capacity
    pub max_memory_items: usize,
    /// `memory_entries / max_memory_items`
    pub memory_occupancy: f64,
    /// Whether a distributed tier is configured
    pub distributed_enabled: bool,
    /// Whether the last distributed call succeeded
    pub distributed_connected: bool,
}

impl CacheStats {
    /// Create empty cache statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate from hits and misses
    pub fn calculate_hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Outcome of one cleanup sweep over the memory tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Items removed because they expired
    pub expired: usize,
    /// Items removed to get back within capacity
    pub evicted: usize,
}

impl CleanupReport {
    /// Total number of removed items
    pub fn total(&self) -> usize {
        self.expired + self.evicted
    }
}
