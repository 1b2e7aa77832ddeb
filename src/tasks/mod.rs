//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: removes cache entries past their TTL and prunes idle
//!   rate-limit windows at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
