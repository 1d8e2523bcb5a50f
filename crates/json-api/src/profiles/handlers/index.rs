//! Admin Profile Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use tradein_app::domain::pagination::Page;

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, models::ProfilesResponse},
    state::State,
};

/// Admin Profile Index Handler
#[endpoint(tags("profiles"), summary = "List Profiles", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProfilesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let profiles = state
        .app
        .profiles
        .list_profiles(Page::new(limit.into_inner(), offset.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(profiles.into()))
}
