//! API Module
//!
//! HTTP handlers and routing for the knowledge-base REST API.
//!
//! Read endpoints sit behind the response cache; write endpoints call the
//! matching invalidation helper after a successful mutation.

pub mod extract;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
