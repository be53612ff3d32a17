//! Cache item stored by the memory tier

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Type-erased cached payload
///
/// The memory tier keeps the caller's value as-is, so a value that cannot be
/// serialized for the distributed tier is still served locally.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

/// A single cached unit held by one tier
///
/// Items are never updated in place except for `hit_count`; changing the value
/// or the tags means replacing the item.
#[derive(Clone)]
pub struct CacheItem {
    /// Cache key (`domain:qualifier:id`)
    pub key: String,
    /// Cached payload
    pub value: CachedValue,
    /// Absolute expiry; the item is valid iff `now < expires_at`
    pub expires_at: Instant,
    /// Invalidation groups this item belongs to
    pub tags: BTreeSet<String>,
    /// Successful reads since the item was written
    pub hit_count: u64,
    /// Write time
    pub created_at: Instant,
}

impl CacheItem {
    /// Create an item expiring `ttl` from now
    ///
    /// A zero TTL is bumped to one millisecond so `expires_at > created_at`
    /// always holds.
    pub fn new<K, I, S>(key: K, value: CachedValue, ttl: Duration, tags: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let created_at = Instant::now();
        let ttl = ttl.max(Duration::from_millis(1));
        Self {
            key: key.into(),
            value,
            expires_at: created_at + ttl,
            tags: tags.into_iter().map(Into::into).collect(),
            hit_count: 0,
            created_at,
        }
    }

    /// Check validity at a given instant
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    /// Check if this item has expired
    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Instant::now())
    }

    /// Time left before expiry (zero when expired)
    pub fn remaining_ttl(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Whether the item carries at least one of the given tags
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag.as_ref()))
    }

    /// Clone the payload out as a concrete type
    ///
    /// Returns `None` when the item was stored with a different type.
    pub fn value_as<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.value.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for CacheItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheItem")
            .field("key", &self.key)
            .field("tags", &self.tags)
            .field("hit_count", &self.hit_count)
            .field("remaining_ttl", &self.remaining_ttl())
            .finish_non_exhaustive()
    }
}
