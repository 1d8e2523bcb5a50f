//! Admin Device Model Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    catalog::{errors::into_status_error, index::DeviceModelsResponse},
    extensions::*,
    state::State,
};

/// Admin Device Model Index Handler
///
/// Lists every model that has not been deleted, including inactive ones.
#[endpoint(
    tags("catalog"),
    summary = "List All Device Models",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DeviceModelsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let models = state
        .app
        .catalog
        .list_models(true)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DeviceModelsResponse {
        models: models.into_iter().map(Into::into).collect(),
    }))
}
