//! Distributed tier adapter
//!
//! Wraps a [`DistributedCacheProvider`] and is the boundary where provider
//! errors stop: every operation returns "nothing" instead of an error, so a
//! degraded store never reaches request-serving code.
//!
//! Outages are logged once: `warn` when the store goes down, `debug` while it
//! stays down, `info` when it comes back.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tiercache_domain::{DistributedCacheProvider, DistributedEnvelope, Error, KeyPattern, Result};
use tracing::{debug, info, warn};

const STATE_UNKNOWN: u8 = 0;
const STATE_UP: u8 = 1;
const STATE_DOWN: u8 = 2;

/// Error-absorbing adapter over a distributed store
#[derive(Debug)]
pub struct DistributedTier {
    provider: Arc<dyn DistributedCacheProvider>,
    state: AtomicU8,
}

impl DistributedTier {
    /// Wrap a provider
    pub fn new(provider: Arc<dyn DistributedCacheProvider>) -> Self {
        Self {
            provider,
            state: AtomicU8::new(STATE_UNKNOWN),
        }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Whether the most recent call reached the store
    pub fn is_connected(&self) -> bool {
        self.state.load(Ordering::Relaxed) == STATE_UP
    }

    /// Fetch and decode the envelope stored under `key`
    ///
    /// Undecodable payloads are logged and treated as absent.
    pub async fn get(&self, key: &str) -> Option<DistributedEnvelope> {
        let json = self.observe("get", key, self.provider.get_json(key).await)??;
        match DistributedEnvelope::from_json(&json) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                warn!(key = %key, error = %e, "discarding undecodable distributed cache entry");
                None
            }
        }
    }

    /// Store an envelope with a TTL; true on success
    pub async fn set(&self, key: &str, envelope: &DistributedEnvelope, ttl: Duration) -> bool {
        let json = match envelope.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %key, error = %e, "skipping distributed write");
                return false;
            }
        };
        self.observe("set", key, self.provider.set_json(key, &json, ttl).await)
            .is_some()
    }

    /// Delete a key; true if the store acknowledged the call
    pub async fn delete(&self, key: &str) -> bool {
        self.observe("delete", key, self.provider.delete(key).await)
            .is_some()
    }

    /// Whether the store holds `key`
    pub async fn exists(&self, key: &str) -> bool {
        self.observe("exists", key, self.provider.exists(key).await)
            .unwrap_or(false)
    }

    /// Delete the given keys; true if the store acknowledged the call
    pub async fn delete_keys(&self, keys: &[String]) -> bool {
        if keys.is_empty() {
            return true;
        }
        self.observe("delete_many", "-", self.provider.delete_many(keys).await)
            .is_some()
    }

    /// Delete every key matching a glob; returns deleted keys
    pub async fn delete_matching(&self, pattern: &str) -> Vec<String> {
        let Some(keys) = self.observe("keys", pattern, self.provider.keys(pattern).await) else {
            return Vec::new();
        };
        if keys.is_empty() {
            return keys;
        }
        match self.observe("delete_many", pattern, self.provider.delete_many(&keys).await) {
            Some(_) => keys,
            None => Vec::new(),
        }
    }

    /// Approximate tag invalidation by key convention
    ///
    /// The store has no tag index, so a key is treated as tagged with `t` when
    /// `t` is one of its colon-delimited segments. Callers that know the
    /// exact tagged keys remove those with [`Self::delete_keys`].
    pub async fn delete_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        let mut deleted = BTreeSet::new();
        for tag in tags {
            for glob in KeyPattern::tag_globs(tag.as_ref()) {
                deleted.extend(self.delete_matching(&glob).await);
            }
        }
        deleted.into_iter().collect()
    }

    /// Flush everything owned by the provider; true on success
    pub async fn clear(&self) -> bool {
        self.observe("clear", "*", self.provider.clear().await)
            .is_some()
    }

    /// Probe the store; true when reachable
    pub async fn ping(&self) -> bool {
        self.observe("ping", "-", self.provider.ping().await)
            .is_some()
    }

    /// Number of keys in the store, when reachable
    pub async fn size(&self) -> Option<usize> {
        self.observe("size", "*", self.provider.size().await)
    }

    fn observe<T>(&self, op: &str, key: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.mark_up();
                Some(value)
            }
            Err(e @ Error::TierUnavailable { .. }) => {
                self.mark_down(op, &e);
                None
            }
            Err(e) => {
                // The store answered, but the command failed
                self.mark_up();
                warn!(
                    tier = self.provider_name(),
                    op = op,
                    key = %key,
                    error = %e,
                    "distributed cache operation failed"
                );
                None
            }
        }
    }

    fn mark_up(&self) {
        if self.state.swap(STATE_UP, Ordering::Relaxed) == STATE_DOWN {
            info!(tier = self.provider_name(), "distributed cache tier recovered");
        }
    }

    fn mark_down(&self, op: &str, error: &Error) {
        if self.state.swap(STATE_DOWN, Ordering::Relaxed) == STATE_DOWN {
            debug!(tier = self.provider_name(), op = op, error = %error, "distributed cache tier still unavailable");
        } else {
            warn!(
                tier = self.provider_name(),
                op = op,
                error = %error,
                "distributed cache tier unavailable, degrading to memory-only"
            );
        }
    }
}
