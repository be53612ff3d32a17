//! Tests for tag and pattern invalidation across both tiers

use tiercache_domain::CacheEntryConfig;

use crate::test_utils::{ScriptedDistributedProvider, memory_cache, two_tier_cache};

#[tokio::test]
async fn test_tag_invalidation_removes_only_tagged_entries() {
    let cache = memory_cache();
    cache
        .set("a", 1_i32, CacheEntryConfig::new().with_tag("services"))
        .await;
    cache
        .set("b", 2_i32, CacheEntryConfig::new().with_tag("bookings"))
        .await;

    assert_eq!(cache.invalidate_by_tags(&["services"]).await, 1);

    assert_eq!(cache.get::<i32>("a").await, None);
    assert_eq!(cache.get::<i32>("b").await, Some(2));
}

#[tokio::test]
async fn test_tag_invalidation_matches_any_tag() {
    let cache = memory_cache();
    cache
        .set("a", 1_i32, CacheEntryConfig::new().with_tags(["x", "y"]))
        .await;
    cache
        .set("b", 2_i32, CacheEntryConfig::new().with_tag("z"))
        .await;
    cache.set("c", 3_i32, CacheEntryConfig::new()).await;

    assert_eq!(cache.invalidate_by_tags(&["y", "z"]).await, 2);
    assert!(cache.exists("c").await);
}

#[tokio::test]
async fn test_empty_tag_list_removes_nothing() {
    let cache = memory_cache();
    cache
        .set("a", 1_i32, CacheEntryConfig::new().with_tag("services"))
        .await;

    let none: [&str; 0] = [];
    assert_eq!(cache.invalidate_by_tags(&none).await, 0);
    assert!(cache.exists("a").await);
}

#[tokio::test]
async fn test_tag_invalidation_counts_distinct_keys_across_tiers() {
    let provider = ScriptedDistributedProvider::new();
    let cache = two_tier_cache(&provider);
    cache
        .set(
            "services:detail:1",
            1_i32,
            CacheEntryConfig::new().with_tag("services"),
        )
        .await;
    cache
        .set("bookings:detail:1", 2_i32, CacheEntryConfig::new())
        .await;

    // Same key removed from both tiers counts once
    assert_eq!(cache.invalidate_by_tags(&["services"]).await, 1);
    assert!(!provider.contains_raw("services:detail:1"));
    assert!(provider.contains_raw("bookings:detail:1"));
}

#[tokio::test]
async fn test_tag_invalidation_removes_distributed_copy_of_untagged_key_name() {
    let provider = ScriptedDistributedProvider::new();
    let cache = two_tier_cache(&provider);
    cache.set("a", 1_i32, CacheEntryConfig::new().with_tag("x")).await;
    cache.set("b", 2_i32, CacheEntryConfig::new().with_tag("y")).await;

    assert_eq!(cache.invalidate_by_tags(&["x"]).await, 1);

    // No backfill from the store after invalidation
    assert!(!provider.contains_raw("a"));
    assert_eq!(cache.get::<i32>("a").await, None);
    assert!(provider.contains_raw("b"));
    assert_eq!(cache.get::<i32>("b").await, Some(2));
}

#[tokio::test]
async fn test_distributed_tag_invalidation_uses_key_segments() {
    let provider = ScriptedDistributedProvider::new();
    let cache = two_tier_cache(&provider);
    for key in [
        "services:list:all",
        "catalogue:services:7",
        "home:services",
        "myservices:list",
    ] {
        provider.insert_raw(key, "{}", std::time::Duration::from_secs(60));
    }

    assert_eq!(cache.invalidate_by_tags(&["services"]).await, 3);
    assert!(provider.contains_raw("myservices:list"));
}

#[tokio::test]
async fn test_pattern_invalidation_on_both_tiers() {
    let provider = ScriptedDistributedProvider::new();
    let cache = two_tier_cache(&provider);
    cache
        .set("search:haircut", 1_i32, CacheEntryConfig::new())
        .await;
    cache
        .set("search:massage", 2_i32, CacheEntryConfig::new())
        .await;
    cache
        .set("services:detail:1", 3_i32, CacheEntryConfig::new())
        .await;

    assert_eq!(cache.invalidate_by_pattern("search:*").await, 2);

    assert!(!cache.exists("search:haircut").await);
    assert!(!provider.contains_raw("search:massage"));
    assert!(cache.exists("services:detail:1").await);
}

#[tokio::test]
async fn test_pattern_question_mark_matches_one_char() {
    let cache = memory_cache();
    for key in ["users:profile:1", "users:profile:22"] {
        cache.set(key, 0_u8, CacheEntryConfig::new()).await;
    }

    assert_eq!(cache.invalidate_by_pattern("users:profile:?").await, 1);
    assert!(cache.exists("users:profile:22").await);
}

#[tokio::test]
async fn test_pattern_is_anchored() {
    let cache = memory_cache();
    cache
        .set("archive:search:1", 0_u8, CacheEntryConfig::new())
        .await;

    assert_eq!(cache.invalidate_by_pattern("search:*").await, 0);
    assert!(cache.exists("archive:search:1").await);
}

#[tokio::test]
async fn test_pattern_character_class_agrees_across_tiers() {
    let provider = ScriptedDistributedProvider::new();
    let cache = two_tier_cache(&provider);
    for key in ["search:a1", "search:b2", "search:c3"] {
        cache.set(key, 0_u8, CacheEntryConfig::new()).await;
    }

    assert_eq!(cache.invalidate_by_pattern("search:[ab]*").await, 2);

    assert!(!provider.contains_raw("search:a1"));
    assert!(!provider.contains_raw("search:b2"));
    assert!(cache.exists("search:c3").await);
    assert!(provider.contains_raw("search:c3"));
}

#[tokio::test]
async fn test_unterminated_character_class_removes_nothing() {
    let provider = ScriptedDistributedProvider::new();
    let cache = two_tier_cache(&provider);
    cache.set("search:[a", 0_u8, CacheEntryConfig::new()).await;

    assert_eq!(cache.invalidate_by_pattern("search:[a").await, 0);
    assert!(provider.contains_raw("search:[a"));
}
