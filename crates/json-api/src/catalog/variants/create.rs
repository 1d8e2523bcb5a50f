//! Create Variant Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein::catalog::VariantType;
use tradein_app::domain::catalog::models::NewVariant;

use crate::{
    catalog::{errors::into_status_error, models::VariantResponse},
    extensions::*,
    state::State,
};

/// Create Variant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVariantRequest {
    pub uuid: Uuid,

    /// `carrier` or `storage`
    pub variant_type: String,
    pub name: String,

    /// Signed adjustment in minor units
    pub price_adjustment: i64,
    #[serde(default)]
    pub display_order: i32,
}

/// Create Variant Handler
///
/// Adds a carrier or storage option to a model that offers that kind of variant.
#[endpoint(
    tags("catalog"),
    summary = "Create Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Variant created"),
        (status_code = StatusCode::CONFLICT, description = "Variant already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Model does not offer this variant type"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    model: PathParam<Uuid>,
    json: JsonBody<CreateVariantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let model = model.into_inner();
    let request = json.into_inner();

    let variant_type = request
        .variant_type
        .parse::<VariantType>()
        .or_400("variant_type must be \"carrier\" or \"storage\"")?;

    let variant = state
        .app
        .catalog
        .create_variant(NewVariant {
            uuid: request.uuid.into(),
            model_uuid: model.into(),
            variant_type,
            name: request.name,
            price_adjustment: request.price_adjustment,
            display_order: request.display_order,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/catalog/models/{model}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(variant.into()))
}
