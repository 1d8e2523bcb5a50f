//! Device Model Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{errors::into_status_error, models::DeviceModelResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeviceModelsResponse {
    /// The list of device models
    pub models: Vec<DeviceModelResponse>,
}

/// Device Model Index Handler
///
/// Lists the models customers can currently trade in.
#[endpoint(tags("catalog"), summary = "List Device Models")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DeviceModelsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let models = state
        .app
        .catalog
        .list_models(false)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DeviceModelsResponse {
        models: models.into_iter().map(Into::into).collect(),
    }))
}
