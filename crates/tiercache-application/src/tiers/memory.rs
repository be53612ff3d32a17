//! In-process memory tier
//!
//! A bounded key to [`CacheItem`] map behind a single mutex. Every critical
//! section is short and never crosses an `.await`, so a plain `std` mutex is
//! used rather than an async one.
//!
//! ## Expiry
//!
//! Expired items are dropped lazily when read and in bulk by
//! [`MemoryTier::purge_expired`], which the cleanup scheduler calls.
//!
//! ## Eviction
//!
//! When an insert pushes the map over capacity, expired items go first; then
//! items are evicted by ascending `hit_count`, oldest `created_at` first on
//! ties, until the map is back within the bound.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tiercache_domain::{CacheItem, CleanupReport, KeyPattern};

/// Outcome of a typed memory lookup
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryLookup<T> {
    /// Live item of the requested type
    Hit(T),
    /// The item existed but had expired; it has been removed
    Expired,
    /// The item is live but holds a different type
    TypeMismatch,
    /// No item under this key
    Miss,
}

#[derive(Debug)]
struct Slot {
    item: CacheItem,
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<String, Slot>,
    next_seq: u64,
}

/// Bounded in-process cache tier
#[derive(Debug)]
pub struct MemoryTier {
    inner: Mutex<Inner>,
    max_items: usize,
}

impl MemoryTier {
    /// Create a tier holding at most `max_items` items
    pub fn new(max_items: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_items: max_items.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored items, expired ones included until swept
    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    /// Whether the tier is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a live item and count the read against it
    pub fn get<T>(&self, key: &str) -> MemoryLookup<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let now = Instant::now();
        let mut inner = self.lock();

        match inner.slots.get(key).map(|slot| slot.item.is_valid_at(now)) {
            None => return MemoryLookup::Miss,
            Some(false) => {
                inner.slots.remove(key);
                return MemoryLookup::Expired;
            }
            Some(true) => {}
        }

        let Some(slot) = inner.slots.get_mut(key) else {
            return MemoryLookup::Miss;
        };
        match slot.item.value_as::<T>() {
            Some(value) => {
                slot.item.hit_count += 1;
                MemoryLookup::Hit(value)
            }
            None => MemoryLookup::TypeMismatch,
        }
    }

    /// Whether a live item exists, without counting a read
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.lock()
            .slots
            .get(key)
            .is_some_and(|slot| slot.item.is_valid_at(now))
    }

    /// Snapshot of a live item, without counting a read
    pub fn peek(&self, key: &str) -> Option<CacheItem> {
        let now = Instant::now();
        self.lock()
            .slots
            .get(key)
            .filter(|slot| slot.item.is_valid_at(now))
            .map(|slot| slot.item.clone())
    }

    /// Insert or replace an item, then enforce the capacity bound
    ///
    /// The stored item always starts with `hit_count == 0`.
    pub fn insert(&self, mut item: CacheItem) -> CleanupReport {
        item.hit_count = 0;
        let mut inner = self.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.slots.insert(item.key.clone(), Slot { item, seq });

        if inner.slots.len() <= self.max_items {
            return CleanupReport::default();
        }

        let expired = purge_expired_locked(&mut inner, Instant::now());
        let evicted = evict_locked(&mut inner, self.max_items);
        CleanupReport { expired, evicted }
    }

    /// Remove a key; true if it was present
    pub fn remove(&self, key: &str) -> bool {
        self.lock().slots.remove(key).is_some()
    }

    /// Remove every item carrying at least one of `tags`; returns removed keys
    pub fn remove_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        let mut inner = self.lock();
        let keys: Vec<String> = inner
            .slots
            .iter()
            .filter(|(_, slot)| slot.item.has_any_tag(tags))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &keys {
            inner.slots.remove(key);
        }
        keys
    }

    /// Remove every key matching `pattern`; returns removed keys
    pub fn remove_matching(&self, pattern: &KeyPattern) -> Vec<String> {
        let mut inner = self.lock();
        let keys: Vec<String> = inner
            .slots
            .keys()
            .filter(|key| pattern.matches(key))
            .cloned()
            .collect();
        for key in &keys {
            inner.slots.remove(key);
        }
        keys
    }

    /// Drop every expired item; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        purge_expired_locked(&mut self.lock(), Instant::now())
    }

    /// Evict until the tier is back within capacity; returns evictions
    pub fn enforce_capacity(&self) -> usize {
        evict_locked(&mut self.lock(), self.max_items)
    }

    /// Remove everything; returns how many items were dropped
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let count = inner.slots.len();
        inner.slots.clear();
        count
    }
}

fn purge_expired_locked(inner: &mut Inner, now: Instant) -> usize {
    let before = inner.slots.len();
    inner.slots.retain(|_, slot| slot.item.is_valid_at(now));
    before - inner.slots.len()
}

fn evict_locked(inner: &mut Inner, max_items: usize) -> usize {
    let overflow = inner.slots.len().saturating_sub(max_items);
    if overflow == 0 {
        return 0;
    }

    let mut candidates: Vec<(u64, Instant, u64, String)> = inner
        .slots
        .iter()
        .map(|(key, slot)| {
            (
                slot.item.hit_count,
                slot.item.created_at,
                slot.seq,
                key.clone(),
            )
        })
        .collect();
    candidates.sort_unstable();

    for (hits, _, _, key) in candidates.into_iter().take(overflow) {
        tracing::debug!(key = %key, hit_count = hits, "evicting memory cache item");
        inner.slots.remove(&key);
    }
    overflow
}
