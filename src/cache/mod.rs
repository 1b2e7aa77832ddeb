//! Cache Module
//!
//! Provides the in-memory response cache: store with TTL expiry, key
//! generation, per-route response middleware, and invalidation helpers.

mod entry;
mod invalidation;
mod key;
mod middleware;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use invalidation::{after_config_write, after_document_write, after_image_write};
pub use key::{cache_key, KEY_DELIMITER};
pub use middleware::{cache_response, CachePolicy, KeyFn};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl::default_ttl_for;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to the cache store, as held by application state,
/// middleware, and the background sweep.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Key Prefixes ==
/// Logical key namespaces. Each selects a default TTL and is the unit of
/// bulk invalidation.
pub mod prefix {
    /// Single document detail
    pub const DOCUMENT: &str = "documents";
    /// Document listings (filter/pagination dependent)
    pub const DOCUMENT_LIST: &str = "documents-list";
    /// Single image metadata
    pub const IMAGE: &str = "images";
    /// Image listings
    pub const IMAGE_LIST: &str = "images-list";
    /// Site configuration
    pub const CONFIG: &str = "config";
    /// Search results
    pub const SEARCH: &str = "search";
}
