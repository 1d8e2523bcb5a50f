//! Create Device Model Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein_app::domain::catalog::models::NewDeviceModel;

use crate::{
    catalog::{errors::into_status_error, models::DeviceModelResponse},
    extensions::*,
    state::State,
};

/// Create Device Model Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateDeviceModelRequest {
    pub uuid: Uuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub base_price: u64,
    #[serde(default)]
    pub has_carrier_variants: bool,
    #[serde(default)]
    pub has_storage_variants: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl From<CreateDeviceModelRequest> for NewDeviceModel {
    fn from(request: CreateDeviceModelRequest) -> Self {
        NewDeviceModel {
            uuid: request.uuid.into(),
            name: request.name,
            brand: request.brand,
            category: request.category,
            base_price: request.base_price,
            has_carrier_variants: request.has_carrier_variants,
            has_storage_variants: request.has_storage_variants,
            image_url: request.image_url,
            is_active: request.is_active,
        }
    }
}

/// Create Device Model Handler
#[endpoint(
    tags("catalog"),
    summary = "Create Device Model",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Device model created"),
        (status_code = StatusCode::CONFLICT, description = "Device model already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateDeviceModelRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DeviceModelResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let model = state
        .app
        .catalog
        .create_model(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/catalog/models/{}", model.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(model_uuid = %model.uuid, name = %model.name, "created device model");

    Ok(Json(model.into()))
}
