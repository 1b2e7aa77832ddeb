//! Request and Response models for the HTTP API
//!
//! DTOs for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreateDocumentRequest, CreateImageRequest, ListQuery, SearchQuery};
pub use responses::{FlushResponse, HealthResponse, MutationResponse, StatsResponse};
