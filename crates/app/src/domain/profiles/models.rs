//! Profile Models

use jiff::Timestamp;
use tradein::roles::{Actor, Role};

use crate::uuids::TypedUuid;

/// Profile UUID
pub type ProfileUuid = TypedUuid<Profile>;

/// Profile Model
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub uuid: ProfileUuid,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// This profile acting on its own behalf.
    pub fn actor(&self) -> Actor {
        Actor::new(self.uuid.into_uuid(), self.role)
    }
}

/// New Profile Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub uuid: ProfileUuid,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
}

/// Profile Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
}
