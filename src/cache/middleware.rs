//! Cache Middleware Module
//!
//! Per-route response memoization. Composed in front of idempotent read
//! handlers; a hit short-circuits the request with the stored payload, a
//! miss lets the handler run and captures its body on the way out.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::AppState;
use crate::cache::cache_key;
use crate::error::ApiError;

/// Custom key derivation for routes whose default key would be wrong or
/// too coarse.
pub type KeyFn = Arc<dyn Fn(&Request) -> String + Send + Sync>;

// == Cache Policy ==
/// Per-route caching configuration.
///
/// The prefix selects the key namespace and default TTL; an explicit TTL
/// overrides the prefix default; a key function replaces the default
/// derivation from path and query.
#[derive(Clone)]
pub struct CachePolicy {
    /// Logical key namespace
    pub prefix: &'static str,
    /// Explicit TTL override in seconds
    pub ttl: Option<u64>,
    /// Custom key generator
    pub key_fn: Option<KeyFn>,
}

impl CachePolicy {
    /// Creates a policy for the given prefix with default TTL and key
    /// derivation.
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            ttl: None,
            key_fn: None,
        }
    }

    /// Overrides the prefix-default TTL.
    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl = Some(ttl_seconds);
        self
    }

    /// Replaces the default key derivation.
    pub fn with_key_fn(mut self, key_fn: KeyFn) -> Self {
        self.key_fn = Some(key_fn);
        self
    }

    /// Computes the cache key for a request.
    fn key_for(&self, req: &Request) -> String {
        match &self.key_fn {
            Some(custom) => custom(req),
            None => cache_key(self.prefix, req.uri().path(), req.uri().query()),
        }
    }
}

// == Middleware ==
/// Response-caching middleware.
///
/// Only responses with status exactly 200 are stored; every other outcome
/// passes through untouched. The captured body bytes and the bytes handed
/// to the client are the same buffer, so repeated hits are byte-identical.
pub async fn cache_response(
    State((state, policy)): State<(AppState, CachePolicy)>,
    req: Request,
    next: Next,
) -> Response {
    let key = policy.key_for(&req);

    let cached = { state.cache.write().await.get(&key) };
    if let Some(body) = cached {
        debug!(key = %key, "cache hit");
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();
    }

    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return ApiError::Internal(anyhow::Error::new(err).context("buffering response body"))
                .into_response();
        }
    };

    debug!(key = %key, size = bytes.len(), "cache store");
    state
        .cache
        .write()
        .await
        .set(key, bytes.clone(), policy.ttl);

    Response::from_parts(parts, Body::from(bytes))
}
