//! Gearbase - backend cache and access-control layer for a vehicle
//! technical knowledge base.
//!
//! Provides a response cache with TTL expiry and prefix invalidation,
//! a role/capability evaluator, and a canonical error envelope.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod ratelimit;
pub mod repo;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
