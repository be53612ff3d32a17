//! Wire envelope for the distributed tier
//!
//! The distributed store only sees opaque strings. The envelope carries the
//! value together with its tags and absolute expiry so that a distributed hit
//! can backfill the memory tier with the same TTL and tags it was written with.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Serialized form of a cache item in the distributed store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedEnvelope {
    /// The cached payload as JSON
    pub value: serde_json::Value,
    /// Invalidation groups of the item
    #[serde(default)]
    pub tags: Vec<String>,
    /// Write time
    pub created_at: DateTime<Utc>,
    /// Absolute expiry
    pub expires_at: DateTime<Utc>,
}

impl DistributedEnvelope {
    /// Wrap an already-serialized value
    pub fn new(value: serde_json::Value, tags: Vec<String>, ttl: Duration) -> Self {
        let created_at = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self {
            value,
            tags,
            created_at,
            expires_at: created_at.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Serialize a typed value into an envelope
    pub fn from_value<T: Serialize + ?Sized>(value: &T, tags: Vec<String>, ttl: Duration) -> Result<Self> {
        let json = serde_json::to_value(value)
            .map_err(|e| Error::serialization("Failed to serialize value for distributed tier", e))?;
        Ok(Self::new(json, tags, ttl))
    }

    /// Deserialize the payload into a typed value
    pub fn into_value<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.value)
            .map_err(|e| Error::serialization("Failed to deserialize cached value", e))
    }

    /// Time left before expiry, `None` when already expired
    pub fn remaining_ttl(&self) -> Option<Duration> {
        (self.expires_at - Utc::now())
            .to_std()
            .ok()
            .filter(|ttl| !ttl.is_zero())
    }

    /// Encode for storage
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::serialization("Failed to encode distributed envelope", e))
    }

    /// Decode from storage
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::serialization("Failed to decode distributed envelope", e))
    }
}
