//! Tests for read-through, write-through and fetch-through behaviour

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tiercache_application::CacheCoordinator;
use tiercache_domain::{CacheConfig, CacheEntryConfig};

use crate::test_utils::{
    ScriptedDistributedProvider, distributed_only_cache, memory_cache, two_tier_cache,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Service {
    id: u32,
    name: String,
    price_cents: u64,
}

fn haircut() -> Service {
    Service {
        id: 42,
        name: "Haircut".to_string(),
        price_cents: 2500,
    }
}

#[tokio::test]
async fn test_set_then_get_returns_value() {
    let cache = memory_cache();

    assert!(
        cache
            .set("services:detail:42", haircut(), CacheEntryConfig::new())
            .await
    );
    let cached: Option<Service> = cache.get("services:detail:42").await;

    assert_eq!(cached, Some(haircut()));
}

#[tokio::test]
async fn test_round_trip_through_distributed_tier_only() {
    let provider = ScriptedDistributedProvider::new();
    let cache = distributed_only_cache(&provider);

    assert!(
        cache
            .set("services:detail:42", haircut(), CacheEntryConfig::new())
            .await
    );
    assert!(provider.contains_raw("services:detail:42"));

    let cached: Option<Service> = cache.get("services:detail:42").await;
    assert_eq!(cached, Some(haircut()));
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let provider = ScriptedDistributedProvider::new();
    let cache = two_tier_cache(&provider);

    cache
        .set(
            "services:detail:1",
            "short-lived".to_string(),
            CacheEntryConfig::new().with_ttl_secs(1),
        )
        .await;
    assert!(cache.exists("services:detail:1").await);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let cached: Option<String> = cache.get("services:detail:1").await;
    assert_eq!(cached, None);
    assert!(!cache.exists("services:detail:1").await);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let cache = memory_cache();
    cache
        .set("users:profile:7", 7_u64, CacheEntryConfig::new())
        .await;

    assert!(cache.delete("users:profile:7").await);
    assert!(cache.delete("users:profile:7").await);
    assert_eq!(cache.get::<u64>("users:profile:7").await, None);
    assert_eq!(cache.stats().deletes, 2);
}

#[tokio::test]
async fn test_capacity_eviction_prefers_least_used() {
    let config = CacheConfig {
        max_memory_items: 2,
        ..CacheConfig::default()
    };
    let cache = CacheCoordinator::new(&config, None).unwrap();

    cache.set("k1", 1_u32, CacheEntryConfig::new()).await;
    for _ in 0..5 {
        assert_eq!(cache.get::<u32>("k1").await, Some(1));
    }
    cache.set("k2", 2_u32, CacheEntryConfig::new()).await;
    cache.set("k3", 3_u32, CacheEntryConfig::new()).await;

    assert!(cache.exists("k1").await);
    assert!(!cache.exists("k2").await);
    assert!(cache.exists("k3").await);

    let stats = cache.stats();
    assert_eq!(stats.memory_entries, 2);
    assert_eq!(stats.evictions, 1);
}

#[tokio::test]
async fn test_get_or_set_fetches_once() {
    let cache = memory_cache();
    let calls = AtomicUsize::new(0);
    let counter = &calls;

    let first = cache
        .get_or_set("services:detail:42", CacheEntryConfig::new(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(haircut())
        })
        .await;
    assert_eq!(first, Ok(haircut()));

    let second = cache
        .get_or_set("services:detail:42", CacheEntryConfig::new(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(Service {
                id: 0,
                name: "stale".to_string(),
                price_cents: 0,
            })
        })
        .await;
    assert_eq!(second, Ok(haircut()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let cached: Option<Service> = cache.get("services:detail:42").await;
    assert_eq!(cached, Some(haircut()));
}

#[tokio::test]
async fn test_get_or_set_propagates_fetch_error() {
    let cache = memory_cache();

    let result: Result<Service, String> = cache
        .get_or_set("services:detail:9", CacheEntryConfig::new(), || async {
            Err("database offline".to_string())
        })
        .await;

    assert_eq!(result, Err("database offline".to_string()));
    assert!(!cache.exists("services:detail:9").await);
    assert_eq!(cache.stats().sets, 0);
}

#[tokio::test]
async fn test_hit_rate_from_hits_and_misses() {
    let cache = memory_cache();
    cache.set("a", 1_i32, CacheEntryConfig::new()).await;

    for _ in 0..3 {
        assert_eq!(cache.get::<i32>("a").await, Some(1));
    }
    for _ in 0..2 {
        assert_eq!(cache.get::<i32>("missing").await, None);
    }

    let stats = cache.stats();
    assert_eq!(stats.hits, 3);
    assert_eq!(stats.misses, 2);
    assert!((stats.hit_rate - 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn test_hit_rate_is_zero_without_lookups() {
    let cache = memory_cache();
    assert!(cache.stats().hit_rate.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_reset_stats_zeroes_counters() {
    let cache = memory_cache();
    cache.set("a", 1_i32, CacheEntryConfig::new()).await;
    cache.get::<i32>("a").await;
    cache.get::<i32>("b").await;

    cache.reset_stats();

    let stats = cache.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.sets, 0);
    assert_eq!(stats.memory_entries, 1);
}

#[tokio::test]
async fn test_exists_does_not_touch_stats() {
    let cache = memory_cache();
    cache.set("a", 1_i32, CacheEntryConfig::new()).await;

    assert!(cache.exists("a").await);
    assert!(!cache.exists("b").await);

    let stats = cache.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
}

#[tokio::test]
async fn test_distributed_hit_backfills_memory() {
    let provider = ScriptedDistributedProvider::new();
    let writer = two_tier_cache(&provider);
    let reader = two_tier_cache(&provider);

    writer
        .set(
            "services:detail:42",
            haircut(),
            CacheEntryConfig::new().with_tag("catalogue"),
        )
        .await;

    let cached: Option<Service> = reader.get("services:detail:42").await;
    assert_eq!(cached, Some(haircut()));
    assert_eq!(reader.stats().memory_entries, 1);

    // Served from memory once the store is gone
    provider.set_unreachable(true);
    let cached: Option<Service> = reader.get("services:detail:42").await;
    assert_eq!(cached, Some(haircut()));

    // The backfilled item kept its tags
    assert_eq!(reader.invalidate_by_tags(&["catalogue"]).await, 1);
}

#[tokio::test]
async fn test_unserializable_value_is_cached_in_memory_only() {
    let provider = ScriptedDistributedProvider::new();
    let cache = two_tier_cache(&provider);

    // JSON object keys must be strings
    let mut grid: HashMap<(u32, u32), String> = HashMap::new();
    grid.insert((1, 2), "slot".to_string());

    assert!(
        cache
            .set("bookings:grid:1", grid.clone(), CacheEntryConfig::new())
            .await
    );
    assert_eq!(provider.set_count(), 0);

    let cached: Option<HashMap<(u32, u32), String>> = cache.get("bookings:grid:1").await;
    assert_eq!(cached, Some(grid));
}

#[tokio::test]
async fn test_zero_ttl_is_rejected() {
    let cache = memory_cache();

    let stored = cache
        .set("a", 1_i32, CacheEntryConfig::new().with_ttl(Duration::ZERO))
        .await;

    assert!(!stored);
    assert!(!cache.exists("a").await);
}

#[tokio::test]
async fn test_invalid_key_is_rejected() {
    let cache = memory_cache();

    assert!(!cache.set("", 1_i32, CacheEntryConfig::new()).await);
    assert!(!cache.set("has space", 1_i32, CacheEntryConfig::new()).await);
    assert_eq!(cache.stats().sets, 0);
}

#[tokio::test]
async fn test_type_mismatch_is_a_miss_in_memory_only_mode() {
    let cache = memory_cache();
    cache.set("a", 1_i32, CacheEntryConfig::new()).await;

    assert_eq!(cache.get::<String>("a").await, None);
    assert_eq!(cache.stats().misses, 1);
}

#[tokio::test]
async fn test_clear_empties_both_tiers() {
    let provider = ScriptedDistributedProvider::new();
    let cache = two_tier_cache(&provider);
    cache.set("a", 1_i32, CacheEntryConfig::new()).await;
    cache.set("b", 2_i32, CacheEntryConfig::new()).await;

    assert!(cache.clear().await);
    assert_eq!(cache.stats().memory_entries, 0);
    assert!(!provider.contains_raw("a"));
    assert!(!provider.contains_raw("b"));
}

#[tokio::test]
async fn test_run_cleanup_purges_expired_items() {
    let cache = memory_cache();
    for key in ["a", "b", "c"] {
        cache
            .set(
                key,
                key.to_string(),
                CacheEntryConfig::new().with_ttl(Duration::from_millis(50)),
            )
            .await;
    }
    cache.set("d", "d".to_string(), CacheEntryConfig::new()).await;

    tokio::time::sleep(Duration::from_millis(100)).await;
    let report = cache.run_cleanup();

    assert_eq!(report.expired, 3);
    assert_eq!(report.evicted, 0);
    let stats = cache.stats();
    assert_eq!(stats.memory_entries, 1);
    assert_eq!(stats.expirations, 3);
}

#[tokio::test]
async fn test_coordinator_is_shareable_across_tasks() {
    let cache = Arc::new(memory_cache());

    let mut handles = Vec::new();
    for i in 0..8_u32 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            let key = format!("tasks:item:{i}");
            cache.set(&key, i, CacheEntryConfig::new()).await;
            cache.get::<u32>(&key).await
        }));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), Some(u32::try_from(i).unwrap()));
    }
    assert_eq!(cache.stats().hits, 8);
}
