//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "tiercache.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "tiercache";

/// Environment variable prefix; nested keys are split on `__`
/// (e.g. `TIERCACHE__CACHE__DEFAULT_TTL_SECS`)
pub const CONFIG_ENV_PREFIX: &str = "TIERCACHE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "TIERCACHE_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "tiercache";

// ============================================================================
// HEALTH CHECK CONSTANTS
// ============================================================================

/// Component name reported by cache health checks
pub const HEALTH_COMPONENT_CACHE: &str = "cache";
