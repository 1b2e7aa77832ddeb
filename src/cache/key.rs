//! Cache Key Module
//!
//! Deterministic cache key derivation from request coordinates.
//!
//! A key is `prefix:path:normalized-query`. The query component is the
//! sorted list of raw `k=v` pairs, so the same parameters produce the same
//! key regardless of the order they appear in the URL.

/// Separator between the logical segments of a cache key.
pub const KEY_DELIMITER: &str = ":";

/// Builds the cache key for a request.
///
/// # Arguments
/// * `prefix` - Logical namespace (selects default TTL, unit of invalidation)
/// * `path` - Request path without query string
/// * `query` - Raw query string, if any
pub fn cache_key(prefix: &str, path: &str, query: Option<&str>) -> String {
    format!(
        "{}{}{}{}{}",
        prefix,
        KEY_DELIMITER,
        path,
        KEY_DELIMITER,
        normalize_query(query)
    )
}

/// Sorts the raw `k=v` pairs of a query string into a stable form.
fn normalize_query(query: Option<&str>) -> String {
    let mut pairs: Vec<&str> = query
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty())
        .collect();
    pairs.sort_unstable();
    pairs.join("&")
}
