//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming request bodies and query strings.

use serde::Deserialize;

/// Request body for creating or replacing a document.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentRequest {
    /// Unique document title
    pub title: String,
    /// Category slug
    pub category: String,
    /// Document body text
    pub body: String,
}

impl CreateDocumentRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("Title cannot be empty".to_string());
        }
        if self.title.len() > 200 {
            return Some("Title exceeds maximum length of 200 characters".to_string());
        }
        if self.category.trim().is_empty() {
            return Some("Category cannot be empty".to_string());
        }
        None
    }
}

/// Request body for registering uploaded image metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImageRequest {
    /// Unique file name
    pub name: String,
    /// Public URL of the stored object
    pub url: String,
    /// Object size in bytes
    #[serde(default)]
    pub size_bytes: u64,
}

impl CreateImageRequest {
    /// Validates the request data.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.url.trim().is_empty() {
            return Some("Url cannot be empty".to_string());
        }
        None
    }
}

/// Query parameters for document listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// Optional category filter
    pub category: Option<String>,
    /// 1-based page number
    #[serde(default)]
    pub page: Option<usize>,
}

/// Query parameters for search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// Search term
    pub q: String,
}
