//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Bytes;

// == Cache Entry ==
/// A single cached response payload with expiry metadata.
///
/// The payload is held as [`Bytes`], so storing and serving share one
/// reference-counted buffer. Callers must not assume exclusive ownership
/// of a buffer after handing it to the cache.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response payload
    pub value: Bytes,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    pub fn new(value: Bytes, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl_seconds * 1000,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal
    /// to its expiration time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in seconds (0 once expired).
    pub fn ttl_remaining(&self) -> u64 {
        let now = current_timestamp_ms();
        if self.expires_at > now {
            (self.expires_at - now) / 1000
        } else {
            0
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
