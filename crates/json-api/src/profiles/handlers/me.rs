//! Current Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use tradein_app::domain::profiles::models::ProfileUuid;

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, models::ProfileResponse},
    state::State,
};

/// Current Profile Handler
#[endpoint(tags("profiles"), summary = "Get My Profile", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let profile = state
        .app
        .profiles
        .get_profile(ProfileUuid::from_uuid(actor.profile))
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
