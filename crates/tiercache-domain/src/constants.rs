//! Domain layer constants

// ============================================================================
// CACHE DEFAULTS
// ============================================================================

/// Default TTL for cache entries (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default maximum number of items held by the memory tier
pub const DEFAULT_MAX_MEMORY_ITEMS: usize = 1000;

/// Default interval of the background cleanup sweep (5 minutes)
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300;

/// Default connect timeout for the distributed store in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;

/// Default distributed store provider name
pub const DEFAULT_DISTRIBUTED_PROVIDER: &str = "redis";

// ============================================================================
// KEY CONVENTIONS
// ============================================================================

/// Separator between key segments (`domain:qualifier:id`)
pub const CACHE_KEY_SEPARATOR: char = ':';

/// Maximum cache key length in characters
pub const MAX_CACHE_KEY_LENGTH: usize = 250;

// ============================================================================
// INVALIDATION GROUPS
// ============================================================================

/// Tag carried by every service listing/detail entry
pub const TAG_SERVICES: &str = "services";

/// Tag carried by every booking entry
pub const TAG_BOOKINGS: &str = "bookings";

/// Pattern covering all cached search results
pub const PATTERN_SEARCH: &str = "search:*";

/// Key domain of user entries
pub const USERS_DOMAIN: &str = "users";

/// Key qualifier of user profile entries
pub const PROFILE_QUALIFIER: &str = "profile";
