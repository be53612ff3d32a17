//! Tests for the Moka provider

use std::time::Duration;

use tiercache_providers::DistributedCacheProvider;
use tiercache_providers::cache::MokaCacheProvider;

#[tokio::test]
async fn test_set_get_delete() {
    let provider = MokaCacheProvider::new();

    provider
        .set_json("services:detail:1", r#"{"name":"Haircut"}"#, Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(
        provider.get_json("services:detail:1").await.unwrap().as_deref(),
        Some(r#"{"name":"Haircut"}"#)
    );
    assert!(provider.exists("services:detail:1").await.unwrap());
    assert!(provider.delete("services:detail:1").await.unwrap());
    assert!(!provider.delete("services:detail:1").await.unwrap());
    assert_eq!(provider.get_json("services:detail:1").await.unwrap(), None);
}

#[tokio::test]
async fn test_entries_expire_with_their_own_ttl() {
    let provider = MokaCacheProvider::new();
    provider
        .set_json("short", "1", Duration::from_millis(100))
        .await
        .unwrap();
    provider
        .set_json("long", "2", Duration::from_secs(60))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(provider.get_json("short").await.unwrap(), None);
    assert_eq!(provider.get_json("long").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_keys_by_glob_and_delete_many() {
    let provider = MokaCacheProvider::new();
    for key in ["search:a", "search:b", "services:detail:1"] {
        provider
            .set_json(key, "{}", Duration::from_secs(60))
            .await
            .unwrap();
    }

    let keys = provider.keys("search:*").await.unwrap();
    assert_eq!(keys, vec!["search:a".to_string(), "search:b".to_string()]);

    assert_eq!(provider.delete_many(&keys).await.unwrap(), 2);
    assert_eq!(provider.size().await.unwrap(), 1);
}

#[tokio::test]
async fn test_clear_and_ping() {
    let provider = MokaCacheProvider::with_capacity(10);
    provider
        .set_json("a", "1", Duration::from_secs(60))
        .await
        .unwrap();

    provider.ping().await.unwrap();
    provider.clear().await.unwrap();

    assert_eq!(provider.size().await.unwrap(), 0);
    assert_eq!(provider.provider_name(), "moka");
    assert_eq!(provider.max_entries(), 10);
}
