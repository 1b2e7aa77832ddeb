//! API Routes
//!
//! Configures the axum router. Read endpoints get a per-route cache
//! policy; mutations stay uncached and run the invalidation helpers
//! themselves.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats, create_document, create_image, delete_document, delete_image, flush_cache,
    get_document, get_image, get_site_config, health, list_documents, list_images,
    search_documents, update_document, AppState,
};
use crate::cache::{cache_response, prefix, CachePolicy};
use crate::ratelimit::enforce_rate_limit;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /documents`, `GET /documents/:id`, `GET /search` - cached reads
/// - `POST /documents`, `PUT /documents/:id`, `DELETE /documents/:id`
/// - `GET /images`, `GET /images/:id`, `POST /images`, `DELETE /images/:id`
/// - `GET /config` - cached site configuration
/// - `GET /cache/stats`, `POST /cache/flush` - cache operations
/// - `GET /health` - health check
///
/// # Middleware
/// - Per-route response cache on idempotent reads
/// - Global rate limiting, CORS, and request tracing
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Cache layers wrap only the GET handler on each path; methods added
    // after route_layer stay uncached.
    Router::new()
        .route(
            "/documents",
            get(list_documents)
                .route_layer(from_fn_with_state(
                    (state.clone(), CachePolicy::new(prefix::DOCUMENT_LIST)),
                    cache_response,
                ))
                .post(create_document),
        )
        .route(
            "/documents/:id",
            get(get_document)
                .route_layer(from_fn_with_state(
                    (state.clone(), CachePolicy::new(prefix::DOCUMENT)),
                    cache_response,
                ))
                .put(update_document)
                .delete(delete_document),
        )
        .route(
            "/search",
            get(search_documents).route_layer(from_fn_with_state(
                (state.clone(), CachePolicy::new(prefix::SEARCH)),
                cache_response,
            )),
        )
        .route(
            "/images",
            get(list_images)
                .route_layer(from_fn_with_state(
                    (state.clone(), CachePolicy::new(prefix::IMAGE_LIST)),
                    cache_response,
                ))
                .post(create_image),
        )
        .route(
            "/images/:id",
            get(get_image)
                .route_layer(from_fn_with_state(
                    (state.clone(), CachePolicy::new(prefix::IMAGE)),
                    cache_response,
                ))
                .delete(delete_image),
        )
        .route(
            "/config",
            get(get_site_config).route_layer(from_fn_with_state(
                (state.clone(), CachePolicy::new(prefix::CONFIG)),
                cache_response,
            )),
        )
        .route("/cache/stats", get(cache_stats))
        .route("/cache/flush", post(flush_cache))
        .route("/health", get(health))
        .layer(from_fn_with_state(state.clone(), enforce_rate_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::ratelimit::RateLimiter;
    use crate::repo::Repository;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(
            CacheStore::new(300),
            Repository::new(),
            RateLimiter::new(60, 1000),
        );
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_document_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/documents")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"title":"Oil change","category":"engine","body":"5W-30"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_get_document_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/documents/404")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_documents_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/documents?category=engine&page=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
