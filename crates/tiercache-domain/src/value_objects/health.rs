//! Cache health reporting

use serde::{Deserialize, Serialize};

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every enabled tier is operational
    Healthy,
    /// The distributed tier is enabled but unreachable; serving memory-only
    Degraded,
}

impl HealthStatus {
    /// Check if the status indicates the cache is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Lowercase status name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a cache health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheHealth {
    /// Overall status
    pub status: HealthStatus,
    /// Human readable detail
    pub detail: String,
    /// Whether the memory tier is enabled
    pub memory_enabled: bool,
    /// Whether the distributed tier is enabled
    pub distributed_enabled: bool,
    /// Whether the distributed tier answered the probe
    pub distributed_connected: bool,
    /// Distributed provider name, if any
    pub provider: Option<String>,
    /// Keys held by the distributed store, when it answered
    pub distributed_entries: Option<usize>,
    /// Probe duration in milliseconds
    pub response_time_ms: u64,
}

impl CacheHealth {
    /// Check if the overall cache is healthy
    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }
}
