//! Error types for the knowledge-base backend
//!
//! Every failure leaving the HTTP boundary is reduced to a canonical
//! (status, message, code) triple and rendered as a uniform JSON envelope.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::repo::RepoError;

/// Whether error responses may carry internal detail.
///
/// Set once at startup from [`crate::Config::dev_mode`]; outside development
/// the internal message is replaced with a generic one.
static DEV_MODE: AtomicBool = AtomicBool::new(false);

/// Enables or disables development-mode error detail.
pub fn set_dev_mode(enabled: bool) {
    DEV_MODE.store(enabled, Ordering::Relaxed);
}

fn dev_mode() -> bool {
    DEV_MODE.load(Ordering::Relaxed)
}

// == Canonical Error Enum ==
/// Canonical error for the HTTP boundary.
///
/// Each variant carries a fixed HTTP status and machine-readable code so
/// clients can branch on `code` without parsing messages.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request data failed validation
    #[error("{0}")]
    Validation(String),

    /// Uniqueness constraint violated
    #[error("Duplicate value '{value}' for field '{field}'")]
    Duplicate { field: String, value: String },

    /// A field could not be coerced to its expected type
    #[error("Invalid value: {0}")]
    Cast(String),

    /// Authentication token is malformed or unverifiable
    #[error("Invalid authentication token")]
    TokenInvalid,

    /// Authentication token has expired
    #[error("Authentication token expired")]
    TokenExpired,

    /// Authenticated but not permitted
    #[error("{0}")]
    Forbidden(String),

    /// Requested entity does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Client exceeded its request budget
    #[error("Too many requests, slow down")]
    RateLimited,

    /// Unclassified internal failure
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Duplicate { .. } | ApiError::Cast(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::TokenInvalid | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for client branching.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Duplicate { .. } => "DUPLICATE_KEY",
            ApiError::Cast(_) => "CAST_ERROR",
            ApiError::TokenInvalid => "TOKEN_INVALID",
            ApiError::TokenExpired => "TOKEN_EXPIRED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::RateLimited => "RATE_LIMITED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    // == Normalize ==
    /// Classifies an arbitrary failure into a canonical error.
    ///
    /// Classification order: already-canonical errors pass through, then
    /// known typed failures (repository conflicts, JSON coercion), then
    /// everything else becomes an internal error.
    pub fn normalize(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ApiError>() {
            Ok(canonical) => return canonical,
            Err(err) => err,
        };
        let err = match err.downcast::<RepoError>() {
            Ok(repo) => return repo.into(),
            Err(err) => err,
        };
        if err.downcast_ref::<serde_json::Error>().is_some() {
            return ApiError::Cast(err.to_string());
        }
        ApiError::Internal(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::normalize(err)
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate { field, value } => ApiError::Duplicate { field, value },
            RepoError::NotFound(what) => ApiError::NotFound(what),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Fire-and-forget structured log; request path/method are carried
        // by the surrounding trace layer.
        if status.is_server_error() {
            error!(status = %status, code, error = %self, "request failed");
        } else {
            warn!(status = %status, code, error = %self, "request rejected");
        }

        let message = match &self {
            ApiError::Internal(_) if !dev_mode() => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let mut body = json!({
            "success": false,
            "error": message,
            "code": code,
        });
        if dev_mode() {
            if let ApiError::Internal(source) = &self {
                body["detail"] = json!(format!("{:#}", source));
            }
        }

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
