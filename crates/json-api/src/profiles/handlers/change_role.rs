//! Change Role Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein::roles::Role;

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, models::ProfileResponse},
    state::State,
};

/// Change Role Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChangeRoleRequest {
    /// `user` or `admin`
    pub role: String,
}

/// Change Role Handler
///
/// Administrators may not demote themselves.
#[endpoint(
    tags("profiles"),
    summary = "Change Profile Role",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Role changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown role"),
        (status_code = StatusCode::FORBIDDEN, description = "Role change not permitted"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "profiles.role.change",
    skip(profile, json, depot),
    fields(profile_uuid = tracing::field::Empty, role = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    profile: PathParam<Uuid>,
    json: JsonBody<ChangeRoleRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let role = json
        .into_inner()
        .role
        .parse::<Role>()
        .or_400("could not parse \"role\"")?;
    let target = profile.into_inner();

    let span = tracing::Span::current();

    span.record("profile_uuid", tracing::field::display(target));
    span.record("role", role.as_str());

    let updated = state
        .app
        .profiles
        .change_role(actor, target.into(), role)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        profile_uuid = %target,
        role = %updated.role,
        changed_by = %actor.profile,
        "changed role"
    );

    Ok(Json(updated.into()))
}
