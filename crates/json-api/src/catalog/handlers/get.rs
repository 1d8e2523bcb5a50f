//! Get Device Model Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    catalog::{errors::into_status_error, models::DeviceModelDetailsResponse},
    extensions::*,
    state::State,
};

/// Get Device Model Handler
///
/// Returns a model together with its carrier and storage variants.
#[endpoint(
    tags("catalog"),
    summary = "Get Device Model",
    responses(
        (status_code = StatusCode::OK, description = "Device model found"),
        (status_code = StatusCode::NOT_FOUND, description = "Device model not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    model: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<DeviceModelDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details = state
        .app
        .catalog
        .get_model(model.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
