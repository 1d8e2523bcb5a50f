//! Profile request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein_app::domain::profiles::models::Profile;

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub uuid: Uuid,
    pub email: String,
    pub display_name: Option<String>,

    /// `user` or `admin`
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            uuid: profile.uuid.into_uuid(),
            email: profile.email,
            display_name: profile.display_name,
            role: profile.role.as_str().to_string(),
            created_at: profile.created_at.to_string(),
            updated_at: profile.updated_at.to_string(),
        }
    }
}

/// Profiles Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfilesResponse {
    pub profiles: Vec<ProfileResponse>,
}

impl From<Vec<Profile>> for ProfilesResponse {
    fn from(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: profiles.into_iter().map(Into::into).collect(),
        }
    }
}
