//! Domain invalidation triggers
//!
//! Thin wrappers mapping business events onto tag and pattern invalidation.

use std::fmt;
use std::sync::Arc;

use tiercache_domain::CacheKey;
use tiercache_domain::constants::{
    PATTERN_SEARCH, PROFILE_QUALIFIER, TAG_BOOKINGS, TAG_SERVICES, USERS_DOMAIN,
};
use tracing::info;

use crate::coordinator::CacheCoordinator;

/// Invalidation entry points for domain events
#[derive(Debug, Clone)]
pub struct CacheInvalidationService {
    cache: Arc<CacheCoordinator>,
}

impl CacheInvalidationService {
    /// Create a service over a shared coordinator
    pub fn new(cache: Arc<CacheCoordinator>) -> Self {
        Self { cache }
    }

    /// Key under which a user profile is cached
    pub fn user_profile_key(user_id: impl fmt::Display) -> String {
        CacheKey::new(USERS_DOMAIN, PROFILE_QUALIFIER)
            .id(user_id)
            .build()
    }

    /// The service catalogue changed: drop service entries and search results
    ///
    /// Returns the number of keys removed.
    pub async fn services_changed(&self) -> usize {
        let by_tag = self.cache.invalidate_by_tags(&[TAG_SERVICES]).await;
        let by_pattern = self.cache.invalidate_by_pattern(PATTERN_SEARCH).await;
        info!(removed = by_tag + by_pattern, "services changed");
        by_tag + by_pattern
    }

    /// A user's profile changed: drop the cached profile
    pub async fn user_profile_changed(&self, user_id: impl fmt::Display) -> bool {
        let key = Self::user_profile_key(user_id);
        info!(key = %key, "user profile changed");
        self.cache.delete(&key).await
    }

    /// A booking changed: drop booking entries
    ///
    /// Returns the number of keys removed.
    pub async fn booking_changed(&self) -> usize {
        let removed = self.cache.invalidate_by_tags(&[TAG_BOOKINGS]).await;
        info!(removed, "booking changed");
        removed
    }
}
