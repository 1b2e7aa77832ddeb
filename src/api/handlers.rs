//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use super::extract::{Json, Query};

use crate::cache::{self, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    CreateDocumentRequest, CreateImageRequest, FlushResponse, HealthResponse, ListQuery,
    MutationResponse, SearchQuery, StatsResponse,
};
use crate::ratelimit::RateLimiter;
use crate::repo::{Document, Image, Repository};

/// Application state shared across all handlers.
///
/// Explicitly constructed at the composition root and injected, so tests
/// get isolated instances.
#[derive(Clone)]
pub struct AppState {
    /// Response cache
    pub cache: SharedCache,
    /// Content repository
    pub repo: Arc<RwLock<Repository>>,
    /// Per-client request budget
    pub limiter: Arc<RwLock<RateLimiter>>,
}

impl AppState {
    /// Creates a new AppState from explicit components.
    pub fn new(cache: CacheStore, repo: Repository, limiter: RateLimiter) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            repo: Arc::new(RwLock::new(repo)),
            limiter: Arc::new(RwLock::new(limiter)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CacheStore::new(config.default_ttl),
            Repository::new(),
            RateLimiter::new(config.rate_limit_window, config.rate_limit_max),
        )
    }
}

// == Document Handlers ==

/// Handler for GET /documents
///
/// Cached under the `documents-list` prefix; every distinct filter and
/// page combination gets its own key.
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Document>> {
    let repo = state.repo.read().await;
    Json(repo.list_documents(query.category.as_deref(), query.page.unwrap_or(1)))
}

/// Handler for GET /documents/:id
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>> {
    let repo = state.repo.read().await;
    repo.get_document(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Document".to_string()))
}

/// Handler for POST /documents
pub async fn create_document(
    State(state): State<AppState>,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let doc = {
        let mut repo = state.repo.write().await;
        repo.insert_document(req.title, req.category, req.body)?
    };
    cache::after_document_write(&state.cache, Some(&doc.id)).await;

    Ok((StatusCode::CREATED, Json(doc)))
}

/// Handler for PUT /documents/:id
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<Json<Document>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let doc = {
        let mut repo = state.repo.write().await;
        repo.update_document(&id, req.title, req.category, req.body)?
    };
    cache::after_document_write(&state.cache, Some(&id)).await;

    Ok(Json(doc))
}

/// Handler for DELETE /documents/:id
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>> {
    {
        let mut repo = state.repo.write().await;
        repo.delete_document(&id)?;
    }
    cache::after_document_write(&state.cache, Some(&id)).await;

    Ok(Json(MutationResponse::deleted("Document", id)))
}

/// Handler for GET /search
///
/// Cached under the `search` prefix keyed by the query term.
pub async fn search_documents(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Document>> {
    let repo = state.repo.read().await;
    Json(repo.search_documents(&query.q))
}

// == Image Handlers ==

/// Handler for GET /images
pub async fn list_images(State(state): State<AppState>) -> Json<Vec<Image>> {
    let repo = state.repo.read().await;
    Json(repo.list_images())
}

/// Handler for GET /images/:id
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Image>> {
    let repo = state.repo.read().await;
    repo.get_image(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Image".to_string()))
}

/// Handler for POST /images
pub async fn create_image(
    State(state): State<AppState>,
    Json(req): Json<CreateImageRequest>,
) -> Result<(StatusCode, Json<Image>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let image = {
        let mut repo = state.repo.write().await;
        repo.insert_image(req.name, req.url, req.size_bytes)?
    };
    cache::after_image_write(&state.cache, Some(&image.id)).await;

    Ok((StatusCode::CREATED, Json(image)))
}

/// Handler for DELETE /images/:id
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>> {
    {
        let mut repo = state.repo.write().await;
        repo.delete_image(&id)?;
    }
    cache::after_image_write(&state.cache, Some(&id)).await;

    Ok(Json(MutationResponse::deleted("Image", id)))
}

// == Config Handler ==

/// Handler for GET /config
pub async fn get_site_config(State(state): State<AppState>) -> Json<Value> {
    let repo = state.repo.read().await;
    Json(repo.site_config())
}

// == Operational Handlers ==

/// Handler for GET /cache/stats
///
/// Read-only snapshot for operational polling.
pub async fn cache_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from_stats(cache.stats()))
}

/// Handler for POST /cache/flush
pub async fn flush_cache(State(state): State<AppState>) -> Json<FlushResponse> {
    let removed = state.cache.write().await.flush_all();
    Json(FlushResponse::new(removed))
}

/// Handler for GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let cached_keys = state.cache.read().await.len();
    Json(HealthResponse::healthy(cached_keys))
}
