//! Cache Store Module
//!
//! In-memory key-value table with per-entry expiry, hit/miss accounting,
//! and substring-based bulk eviction.

use std::collections::HashMap;

use axum::body::Bytes;

use crate::cache::{default_ttl_for, CacheEntry, CacheStats, KEY_DELIMITER};

// == Cache Store ==
/// Response cache keyed by `prefix:path:query` strings.
///
/// Entries expire by TTL (reclaimed lazily on access and by the periodic
/// sweep), by explicit substring eviction after mutations, or by a full
/// flush. There is no capacity bound.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Successful lookups
    hits: u64,
    /// Failed lookups (absent or expired)
    misses: u64,
    /// Fallback TTL in seconds for prefixes without a table default
    default_ttl: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new store with the given fallback TTL in seconds.
    pub fn new(default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
            default_ttl,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the stored payload if present and not expired; expired
    /// entries are removed on access and count as misses.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.misses += 1;
                None
            }
            Some(entry) => {
                self.hits += 1;
                Some(entry.value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites an entry, resetting its expiry.
    ///
    /// TTL resolution: the explicit `ttl` if given, else the default for
    /// the key's prefix, else the store-wide fallback.
    pub fn set(&mut self, key: String, value: Bytes, ttl: Option<u64>) {
        let effective_ttl = ttl
            .or_else(|| default_ttl_for(key_prefix(&key)))
            .unwrap_or(self.default_ttl);
        self.entries.insert(key, CacheEntry::new(value, effective_ttl));
    }

    // == Delete ==
    /// Removes a single entry. Returns true if it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Delete Containing ==
    /// Removes every entry whose key contains the given substring.
    ///
    /// Linear scan over all keys; returns the number removed. Over-matching
    /// is acceptable, the next read repopulates.
    pub fn delete_containing(&mut self, substring: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(substring));
        before - self.entries.len()
    }

    // == Flush All ==
    /// Removes every entry; returns the prior entry count.
    pub fn flush_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Sweep Expired ==
    /// Removes all entries past their expiry.
    ///
    /// Returns the number of entries removed. Bounds memory for cold keys
    /// that are never looked up again.
    pub fn sweep_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Stats ==
    /// Returns a statistics snapshot.
    ///
    /// `keys_by_prefix` counts keys as stored, including expired entries
    /// the sweep has not yet reclaimed; counts self-correct at the next
    /// sweep cycle.
    pub fn stats(&self) -> CacheStats {
        let mut keys_by_prefix = std::collections::BTreeMap::new();
        for key in self.entries.keys() {
            *keys_by_prefix
                .entry(key_prefix(key).to_string())
                .or_insert(0) += 1;
        }
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            total_keys: self.entries.len(),
            keys_by_prefix,
        }
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The namespace segment of a key: everything before the first delimiter.
fn key_prefix(key: &str) -> &str {
    key.split(KEY_DELIMITER).next().unwrap_or(key)
}
