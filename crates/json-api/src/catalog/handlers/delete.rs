//! Delete Device Model Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Delete Device Model Handler
///
/// Retires a model; offers already made for it are kept.
#[endpoint(
    tags("catalog"),
    summary = "Delete Device Model",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Device model deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Device model not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    model: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let model = model.into_inner();

    state
        .app
        .catalog
        .delete_model(model.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(model_uuid = %model, "deleted device model");

    Ok(StatusCode::NO_CONTENT)
}
