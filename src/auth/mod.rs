//! Auth Module
//!
//! Role and capability evaluation for UI gating and write-route checks.
//! Identity itself is established elsewhere; this module only answers
//! questions about an already-authenticated user record.

mod permissions;

pub use permissions::{
    can_manage_content_type, effective_capabilities, has_all_capabilities, has_any_capability,
    has_any_role, has_capability, has_role, verify_role_table, Capability, Role, User,
};
