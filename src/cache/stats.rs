//! Cache Statistics Module
//!
//! Snapshot of cache performance: hit/miss counters and key counts grouped
//! by namespace prefix.

use std::collections::BTreeMap;

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time cache statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Current number of keys in the store
    pub total_keys: usize,
    /// Current key counts grouped by the segment before the first delimiter
    pub keys_by_prefix: BTreeMap<String, usize>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
