//! Tests for CacheStats and health value objects

use tiercache_domain::{CacheStats, CleanupReport, HealthStatus};

#[test]
fn test_hit_rate_with_no_lookups_is_zero() {
    assert_eq!(CacheStats::new().calculate_hit_rate(), 0.0);
}

#[test]
fn test_hit_rate_three_hits_two_misses() {
    let stats = CacheStats {
        hits: 3,
        misses: 2,
        ..Default::default()
    };
    assert!((stats.calculate_hit_rate() - 0.6).abs() < f64::EPSILON);
}

#[test]
fn test_cleanup_report_total() {
    let report = CleanupReport {
        expired: 2,
        evicted: 3,
    };
    assert_eq!(report.total(), 5);
}

#[test]
fn test_health_status_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&HealthStatus::Degraded).unwrap(),
        "\"degraded\""
    );
    assert_eq!(HealthStatus::Healthy.to_string(), "healthy");
    assert!(HealthStatus::Healthy.is_healthy());
    assert!(!HealthStatus::Degraded.is_healthy());
}
