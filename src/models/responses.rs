//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for mutations that return no entity (DELETE).
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    /// Success message
    pub message: String,
    /// The affected entity id
    pub id: String,
}

impl MutationResponse {
    /// Creates a deletion acknowledgement.
    pub fn deleted(what: &str, id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("{} '{}' deleted successfully", what, id),
            id,
        }
    }
}

/// Response body for the cache flush endpoint (POST /cache/flush).
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl FlushResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Flushed {} cache entries", removed),
            removed,
        }
    }
}

/// Response body for the cache statistics endpoint (GET /cache/stats).
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of keys in the store
    pub total_keys: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Key counts grouped by namespace prefix
    pub keys_by_prefix: BTreeMap<String, usize>,
    /// Resident set size in kilobytes, when readable
    pub memory_kb: Option<u64>,
}

impl StatsResponse {
    /// Builds the operational snapshot from a store statistics snapshot.
    pub fn from_stats(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            hits: stats.hits,
            misses: stats.misses,
            total_keys: stats.total_keys,
            hit_rate,
            keys_by_prefix: stats.keys_by_prefix,
            memory_kb: process_memory_kb(),
        }
    }
}

/// Response body for the health endpoint (GET /health).
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Current number of cached keys
    pub cached_keys: usize,
    /// Resident set size in kilobytes, when readable
    pub memory_kb: Option<u64>,
}

impl HealthResponse {
    /// Creates a healthy response with the current timestamp.
    pub fn healthy(cached_keys: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cached_keys,
            memory_kb: process_memory_kb(),
        }
    }
}

/// Reads the process resident set size from procfs.
///
/// Returns None on platforms without /proc or when the field is missing.
fn process_memory_kb() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_response_serialize() {
        let resp = MutationResponse::deleted("Document", "42");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("42"));
        assert!(json.contains("deleted"));
    }

    #[test]
    fn test_flush_response() {
        let resp = FlushResponse::new(7);
        assert_eq!(resp.removed, 7);
        assert!(resp.message.contains('7'));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..Default::default()
        };
        let resp = StatsResponse::from_stats(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(3);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
        assert!(json.contains("cached_keys"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_process_memory_readable_on_linux() {
        assert!(process_memory_kb().is_some());
    }
}
