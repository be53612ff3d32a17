//! Tests for CacheEntryConfig

use std::time::Duration;
use tiercache_domain::CacheEntryConfig;

#[test]
fn test_default_has_no_ttl_and_no_tags() {
    let config = CacheEntryConfig::default();
    assert_eq!(config.ttl, None);
    assert!(config.tags.is_empty());
    assert_eq!(
        config.effective_ttl(Duration::from_secs(300)),
        Duration::from_secs(300)
    );
}

#[test]
fn test_builder_collects_tags() {
    let config = CacheEntryConfig::new()
        .with_ttl_secs(60)
        .with_tag("services")
        .with_tags(["featured", "search"]);

    assert_eq!(config.ttl, Some(Duration::from_secs(60)));
    assert_eq!(config.tags, vec!["services", "featured", "search"]);
}
