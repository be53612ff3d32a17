//! Tests for domain invalidation triggers

use std::sync::Arc;

use tiercache_application::CacheInvalidationService;
use tiercache_domain::CacheEntryConfig;

use crate::test_utils::memory_cache;

#[tokio::test]
async fn test_services_changed_drops_services_and_searches() {
    let cache = Arc::new(memory_cache());
    cache
        .set(
            "services:detail:1",
            1_i32,
            CacheEntryConfig::new().with_tag("services"),
        )
        .await;
    cache
        .set("search:haircut", 2_i32, CacheEntryConfig::new())
        .await;
    cache
        .set(
            "bookings:list:1",
            3_i32,
            CacheEntryConfig::new().with_tag("bookings"),
        )
        .await;

    let service = CacheInvalidationService::new(Arc::clone(&cache));

    assert_eq!(service.services_changed().await, 2);
    assert!(cache.exists("bookings:list:1").await);
}

#[tokio::test]
async fn test_user_profile_changed_deletes_profile() {
    let cache = Arc::new(memory_cache());
    let key = CacheInvalidationService::user_profile_key(7);
    cache
        .set(&key, "Ada".to_string(), CacheEntryConfig::new())
        .await;
    cache
        .set("users:profile:8", "Grace".to_string(), CacheEntryConfig::new())
        .await;

    let service = CacheInvalidationService::new(Arc::clone(&cache));

    assert!(service.user_profile_changed(7).await);
    assert!(!cache.exists("users:profile:7").await);
    assert!(cache.exists("users:profile:8").await);
}

#[tokio::test]
async fn test_booking_changed_drops_bookings() {
    let cache = Arc::new(memory_cache());
    cache
        .set(
            "bookings:list:1",
            1_i32,
            CacheEntryConfig::new().with_tag("bookings"),
        )
        .await;

    let service = CacheInvalidationService::new(Arc::clone(&cache));

    assert_eq!(service.booking_changed().await, 1);
    assert_eq!(service.booking_changed().await, 0);
}

#[test]
fn test_service_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CacheInvalidationService>();
}
