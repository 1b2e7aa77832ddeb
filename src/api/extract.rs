//! Request Extractors
//!
//! Wrappers around axum's `Json` and `Query` extractors whose rejections
//! are converted into [`ApiError`], so a body or query string that fails
//! to parse is answered with the same JSON envelope as every other error
//! instead of axum's plain-text default.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;

// == Json ==
/// JSON body extractor with canonical error rejections.
///
/// Also serves as the response type, delegating to [`axum::Json`].
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            // Unparseable or mistyped payloads are coercion failures; the
            // remaining rejections (missing content type, unreadable body)
            // are malformed requests.
            Err(JsonRejection::JsonSyntaxError(err)) => Err(ApiError::Cast(err.body_text())),
            Err(JsonRejection::JsonDataError(err)) => Err(ApiError::Cast(err.body_text())),
            Err(other) => Err(ApiError::Validation(other.body_text())),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

// == Query ==
/// Query string extractor with canonical error rejections.
#[derive(Debug, Clone)]
pub struct Query<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Query(value)),
            Err(QueryRejection::FailedToDeserializeQueryString(err)) => {
                Err(ApiError::Cast(err.body_text()))
            }
            Err(other) => Err(ApiError::Validation(other.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: String,
    }

    #[derive(Debug, Deserialize)]
    struct Paging {
        page: Option<u32>,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json_body_extracts() {
        let req = json_request(r#"{"title":"Brake bleed"}"#);
        let Json(payload) = Json::<Payload>::from_request(req, &()).await.unwrap();
        assert_eq!(payload.title, "Brake bleed");
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_cast_error() {
        let req = json_request("{not valid json");
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::Cast(_)));
        assert_eq!(err.code(), "CAST_ERROR");
    }

    #[tokio::test]
    async fn test_mistyped_json_field_is_cast_error() {
        let req = json_request(r#"{"title":42}"#);
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::Cast(_)));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_validation_error() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from(r#"{"title":"x"}"#))
            .unwrap();
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unparseable_query_value_is_cast_error() {
        let (mut parts, _) = Request::builder()
            .uri("/documents?page=abc")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let err = Query::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Cast(_)));
        assert_eq!(err.code(), "CAST_ERROR");
    }

    #[tokio::test]
    async fn test_valid_query_extracts() {
        let (mut parts, _) = Request::builder()
            .uri("/documents?page=2")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let Query(paging) = Query::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(paging.page, Some(2));
    }
}
