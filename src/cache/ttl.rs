//! TTL Defaults Module
//!
//! Static table of per-prefix time-to-live defaults. A key's prefix is the
//! segment before the first delimiter; prefixes without a table entry fall
//! back to the store-wide default.

use crate::cache::prefix;

/// Default TTLs in seconds by key prefix.
///
/// Listings and search results turn over quickly; image metadata and site
/// configuration are close to static.
const PREFIX_TTLS: &[(&str, u64)] = &[
    (prefix::DOCUMENT, 300),
    (prefix::DOCUMENT_LIST, 180),
    (prefix::IMAGE, 1800),
    (prefix::IMAGE_LIST, 1800),
    (prefix::CONFIG, 3600),
    (prefix::SEARCH, 120),
];

/// Looks up the default TTL for a key prefix.
pub fn default_ttl_for(prefix: &str) -> Option<u64> {
    PREFIX_TTLS
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, ttl)| *ttl)
}
