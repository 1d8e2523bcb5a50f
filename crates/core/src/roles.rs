//! Roles

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Access level of a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A customer trading in devices.
    #[default]
    User,

    /// Catalog and fulfilment staff.
    Admin,
}

impl Role {
    /// Stable string form used in storage and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may use administrative operations.
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognised role strings.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role \"{0}\"")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated profile performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Profile identifier.
    pub profile: Uuid,

    /// Current role of the profile.
    pub role: Role,
}

impl Actor {
    /// Create an actor.
    pub const fn new(profile: Uuid, role: Role) -> Self {
        Self { profile, role }
    }
}

/// Reasons a role change is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleChangeError {
    /// Only administrators manage roles.
    #[error("only administrators can change roles")]
    NotAdmin,

    /// Administrators cannot remove their own admin role.
    #[error("administrators cannot revoke their own admin role")]
    SelfDemotion,
}

/// Check whether `actor` may set `target`'s role to `new_role`.
///
/// # Errors
///
/// - [`RoleChangeError::NotAdmin`]: the actor is not an administrator.
/// - [`RoleChangeError::SelfDemotion`]: the actor would revoke their own admin role.
pub fn check_role_change(
    actor: &Actor,
    target: Uuid,
    new_role: Role,
) -> Result<(), RoleChangeError> {
    if !actor.role.is_admin() {
        return Err(RoleChangeError::NotAdmin);
    }

    if actor.profile == target && !new_role.is_admin() {
        return Err(RoleChangeError::SelfDemotion);
    }

    Ok(())
}

/// Whether `actor` may set `target`'s role to `new_role`.
pub fn can_modify_role(actor: &Actor, target: Uuid, new_role: Role) -> bool {
    check_role_change(actor, target, new_role).is_ok()
}
