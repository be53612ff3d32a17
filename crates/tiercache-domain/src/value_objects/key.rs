//! Cache key conventions
//!
//! Keys follow `domain:qualifier[:id]`, lowercase and colon-delimited, e.g.
//! `services:detail:42`. The distributed tier relies on this shape to
//! approximate tag invalidation by key pattern, so callers should build keys
//! through [`CacheKey`] rather than by hand.

use crate::constants::{CACHE_KEY_SEPARATOR, MAX_CACHE_KEY_LENGTH};
use crate::error::{Error, Result};
use std::fmt;

/// Cache key builder and utilities
///
/// # Example
///
/// ```
/// use tiercache_domain::value_objects::CacheKey;
///
/// let key = CacheKey::new("Services", "detail").id(42);
/// assert_eq!(key.to_string(), "services:detail:42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    segments: Vec<String>,
}

impl CacheKey {
    /// Start a key from its domain and qualifier
    pub fn new(domain: impl AsRef<str>, qualifier: impl AsRef<str>) -> Self {
        Self {
            segments: vec![normalize(domain.as_ref()), normalize(qualifier.as_ref())],
        }
    }

    /// Append an identifier segment
    pub fn id(mut self, id: impl fmt::Display) -> Self {
        self.segments.push(normalize(&id.to_string()));
        self
    }

    /// Build the final key string
    pub fn build(&self) -> String {
        self.segments.join(&CACHE_KEY_SEPARATOR.to_string())
    }

    /// Create a namespaced cache key
    pub fn namespaced(namespace: &str, key: &str) -> String {
        if namespace.is_empty() {
            key.to_string()
        } else {
            format!("{namespace}{CACHE_KEY_SEPARATOR}{key}")
        }
    }

    /// Extract namespace (first segment) from a key
    pub fn extract_namespace(key: &str) -> Option<&str> {
        key.split_once(CACHE_KEY_SEPARATOR).map(|(ns, _)| ns)
    }

    /// Iterate over the colon-delimited segments of a key
    pub fn segments(key: &str) -> impl Iterator<Item = &str> {
        key.split(CACHE_KEY_SEPARATOR)
    }

    /// Validate cache key format
    pub fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::invalid_argument("Cache key cannot be empty"));
        }

        if key.chars().count() > MAX_CACHE_KEY_LENGTH {
            return Err(Error::invalid_argument(format!(
                "Cache key too long (max {MAX_CACHE_KEY_LENGTH} characters)"
            )));
        }

        if key.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(Error::invalid_argument(
                "Cache key contains invalid characters",
            ));
        }

        Ok(())
    }

    /// Sanitize a cache key by replacing invalid characters
    pub fn sanitize_key(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_control() || c.is_whitespace() {
                    '_'
                } else {
                    c
                }
            })
            .take(MAX_CACHE_KEY_LENGTH)
            .collect()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.build()
    }
}

fn normalize(segment: &str) -> String {
    CacheKey::sanitize_key(&segment.trim().to_lowercase()).replace(CACHE_KEY_SEPARATOR, "_")
}
