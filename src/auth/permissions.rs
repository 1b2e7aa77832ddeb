//! Permission Evaluator Module
//!
//! Pure computation of a user's effective capability set from a static
//! role table, plus predicate functions over that set. Identical input
//! always yields identical output; there is no hidden state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// == Capabilities ==
/// An atomic named permission, distinct from a role (a named bundle of
/// capabilities).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read public content
    ViewContent,
    /// Start forum threads and reply
    CreatePosts,
    /// Edit and delete own forum posts
    EditOwnPosts,
    /// Moderate any forum content
    ModerateForum,
    /// Edit knowledge-base documents
    EditContent,
    /// Publish and edit news items
    ManageNews,
    /// Manage uploaded files and images
    ManageUploads,
    /// Manage user accounts
    ManageUsers,
    /// Change system configuration
    ManageSystem,
}

impl Capability {
    /// The full capability enumeration.
    pub const ALL: &'static [Capability] = &[
        Capability::ViewContent,
        Capability::CreatePosts,
        Capability::EditOwnPosts,
        Capability::ModerateForum,
        Capability::EditContent,
        Capability::ManageNews,
        Capability::ManageUploads,
        Capability::ManageUsers,
        Capability::ManageSystem,
    ];
}

// == Roles ==
/// Closed role enumeration. Privilege is not linear: each role maps to an
/// explicit capability list, nothing is inherited structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guest,
    Member,
    Moderator,
    Editor,
    Admin,
}

impl Role {
    /// The explicit capability list for this role.
    ///
    /// Admin's list is written out in full rather than derived, so
    /// [`verify_role_table`] can catch drift when a new capability is
    /// added to the enumeration but not to the list.
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::Guest => &[Capability::ViewContent],
            Role::Member => &[
                Capability::ViewContent,
                Capability::CreatePosts,
                Capability::EditOwnPosts,
            ],
            Role::Moderator => &[
                Capability::ViewContent,
                Capability::CreatePosts,
                Capability::EditOwnPosts,
                Capability::ModerateForum,
            ],
            Role::Editor => &[
                Capability::ViewContent,
                Capability::CreatePosts,
                Capability::EditOwnPosts,
                Capability::EditContent,
                Capability::ManageNews,
                Capability::ManageUploads,
            ],
            Role::Admin => &[
                Capability::ViewContent,
                Capability::CreatePosts,
                Capability::EditOwnPosts,
                Capability::ModerateForum,
                Capability::EditContent,
                Capability::ManageNews,
                Capability::ManageUploads,
                Capability::ManageUsers,
                Capability::ManageSystem,
            ],
        }
    }
}

/// Checks at startup that the admin role's explicit list covers every
/// enumerated capability.
pub fn verify_role_table() -> Result<(), String> {
    let admin: BTreeSet<Capability> = Role::Admin.capabilities().iter().copied().collect();
    for capability in Capability::ALL {
        if !admin.contains(capability) {
            return Err(format!(
                "admin role table is missing capability {:?}",
                capability
            ));
        }
    }
    Ok(())
}

// == User Record ==
/// The user record supplied by the authentication context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Assigned roles
    pub roles: Vec<Role>,
    /// Inactive users are treated as guests
    pub is_active: bool,
}

// == Evaluation ==
/// Computes the user's effective capability set.
///
/// Absent or inactive users get the guest list; otherwise the union of
/// the capability lists for every assigned role.
pub fn effective_capabilities(user: Option<&User>) -> BTreeSet<Capability> {
    match user {
        Some(user) if user.is_active => user
            .roles
            .iter()
            .flat_map(|role| role.capabilities().iter().copied())
            .collect(),
        _ => Role::Guest.capabilities().iter().copied().collect(),
    }
}

/// True if the user's effective set contains the capability.
pub fn has_capability(user: Option<&User>, capability: Capability) -> bool {
    effective_capabilities(user).contains(&capability)
}

/// True if the user holds at least one of the capabilities.
pub fn has_any_capability(user: Option<&User>, capabilities: &[Capability]) -> bool {
    let effective = effective_capabilities(user);
    capabilities.iter().any(|c| effective.contains(c))
}

/// True if the user holds every one of the capabilities.
pub fn has_all_capabilities(user: Option<&User>, capabilities: &[Capability]) -> bool {
    let effective = effective_capabilities(user);
    capabilities.iter().all(|c| effective.contains(c))
}

/// True if the user is active and assigned the role.
pub fn has_role(user: Option<&User>, role: Role) -> bool {
    matches!(user, Some(u) if u.is_active && u.roles.contains(&role))
}

/// True if the user is active and assigned any of the roles.
pub fn has_any_role(user: Option<&User>, roles: &[Role]) -> bool {
    matches!(user, Some(u) if u.is_active && roles.iter().any(|r| u.roles.contains(r)))
}

/// Decides whether the user may manage a given content type.
///
/// Requires the base edit capability; `system` and `users` content
/// additionally require their management capability. Any other type is
/// allowed once the base check passes.
pub fn can_manage_content_type(user: Option<&User>, content_type: &str) -> bool {
    if !has_capability(user, Capability::EditContent) {
        return false;
    }
    match content_type {
        "system" => has_capability(user, Capability::ManageSystem),
        "users" => has_capability(user, Capability::ManageUsers),
        _ => true,
    }
}
