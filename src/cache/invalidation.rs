//! Cache Invalidation Module
//!
//! Explicit "this mutation invalidates that cached data" relationships,
//! called by write handlers after a successful persistence mutation.
//!
//! Listing and search keys depend on arbitrary filter and pagination
//! combinations, so they are evicted prefix-wide. Over-eviction is
//! acceptable, the next read repopulates; stale data within the TTL window
//! is not.

use tracing::debug;

use crate::cache::{prefix, SharedCache};

/// Evicts cached data made stale by a document create, update, or delete.
///
/// Removes the detail entry for `id` when known, then every document
/// listing and every search result.
pub async fn after_document_write(cache: &SharedCache, id: Option<&str>) {
    let mut store = cache.write().await;
    let mut removed = 0;
    if let Some(id) = id {
        removed += store.delete_containing(&format!("/documents/{id}"));
    }
    removed += store.delete_containing(prefix::DOCUMENT_LIST);
    removed += store.delete_containing(prefix::SEARCH);
    debug!(id = ?id, removed, "invalidated document caches");
}

/// Evicts cached data made stale by an image create or delete.
pub async fn after_image_write(cache: &SharedCache, id: Option<&str>) {
    let mut store = cache.write().await;
    let mut removed = 0;
    if let Some(id) = id {
        removed += store.delete_containing(&format!("/images/{id}"));
    }
    removed += store.delete_containing(prefix::IMAGE_LIST);
    debug!(id = ?id, removed, "invalidated image caches");
}

/// Evicts all cached site configuration.
pub async fn after_config_write(cache: &SharedCache) {
    let removed = cache.write().await.delete_containing(prefix::CONFIG);
    debug!(removed, "invalidated config caches");
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use axum::body::Bytes;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn seeded_cache() -> SharedCache {
        let mut store = CacheStore::new(300);
        let v = Bytes::from_static(b"{}");
        store.set("documents:/documents/1:".into(), v.clone(), None);
        store.set("documents:/documents/2:".into(), v.clone(), None);
        store.set("documents-list:/documents:page=1".into(), v.clone(), None);
        store.set("search:/search:q=brakes".into(), v.clone(), None);
        store.set("images:/images/9:".into(), v.clone(), None);
        store.set("images-list:/images:".into(), v.clone(), None);
        store.set("config:/config:".into(), v, None);
        Arc::new(RwLock::new(store))
    }

    #[tokio::test]
    async fn test_document_write_with_id() {
        let cache = seeded_cache();
        after_document_write(&cache, Some("1")).await;

        let mut store = cache.write().await;
        assert!(store.get("documents:/documents/1:").is_none());
        assert!(store.get("documents:/documents/2:").is_some());
        assert!(store.get("documents-list:/documents:page=1").is_none());
        assert!(store.get("search:/search:q=brakes").is_none());
        assert!(store.get("images:/images/9:").is_some());
    }

    #[tokio::test]
    async fn test_document_write_without_id_spares_details() {
        let cache = seeded_cache();
        after_document_write(&cache, None).await;

        let mut store = cache.write().await;
        assert!(store.get("documents:/documents/1:").is_some());
        assert!(store.get("documents-list:/documents:page=1").is_none());
        assert!(store.get("search:/search:q=brakes").is_none());
    }

    #[tokio::test]
    async fn test_image_write() {
        let cache = seeded_cache();
        after_image_write(&cache, Some("9")).await;

        let mut store = cache.write().await;
        assert!(store.get("images:/images/9:").is_none());
        assert!(store.get("images-list:/images:").is_none());
        assert!(store.get("documents:/documents/1:").is_some());
    }

    #[tokio::test]
    async fn test_config_write() {
        let cache = seeded_cache();
        after_config_write(&cache).await;

        let mut store = cache.write().await;
        assert!(store.get("config:/config:").is_none());
        assert_eq!(store.len(), 6);
    }
}
