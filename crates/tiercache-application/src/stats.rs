//! Hit/miss instrumentation
//!
//! Relaxed atomic counters. Snapshots are not taken atomically across
//! counters; an approximate view is acceptable for reporting.

use std::sync::atomic::{AtomicU64, Ordering};

use tiercache_domain::{CacheStats, CleanupReport};

/// Running counters behind [`CacheStats`]
#[derive(Debug, Default)]
pub struct StatsCollector {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
}

impl StatsCollector {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a set
    pub fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delete
    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lazily discovered expiry
    pub fn record_expiration(&self) {
        self.expirations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record removals performed by an insert or a sweep
    pub fn record_cleanup(&self, report: CleanupReport) {
        self.expirations
            .fetch_add(report.expired as u64, Ordering::Relaxed);
        self.evictions
            .fetch_add(report.evicted as u64, Ordering::Relaxed);
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [
            &self.hits,
            &self.misses,
            &self.sets,
            &self.deletes,
            &self.evictions,
            &self.expirations,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Build a snapshot, filling in tier occupancy supplied by the caller
    pub fn snapshot(
        &self,
        memory_entries: usize,
        max_memory_items: usize,
        distributed_enabled: bool,
        distributed_connected: bool,
    ) -> CacheStats {
        let mut stats = CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            memory_entries,
            max_memory_items,
            distributed_enabled,
            distributed_connected,
            ..CacheStats::default()
        };
        stats.hit_rate = stats.calculate_hit_rate();
        stats.memory_occupancy = if max_memory_items > 0 {
            memory_entries as f64 / max_memory_items as f64
        } else {
            0.0
        };
        stats
    }
}
