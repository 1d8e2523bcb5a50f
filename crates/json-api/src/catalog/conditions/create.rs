//! Create Condition Handler

use std::{str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein::catalog::Multiplier;
use tradein_app::domain::catalog::models::NewCondition;

use crate::{
    catalog::{errors::into_status_error, models::ConditionResponse},
    extensions::*,
    state::State,
};

/// Create Condition Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateConditionRequest {
    pub uuid: Uuid,
    pub name: String,

    /// Non-negative decimal multiplier, e.g. `"0.75"`
    pub multiplier: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl TryFrom<CreateConditionRequest> for NewCondition {
    type Error = StatusError;

    fn try_from(request: CreateConditionRequest) -> Result<Self, Self::Error> {
        let multiplier = Decimal::from_str(request.multiplier.trim())
            .or_400("multiplier must be a decimal number")?;

        Ok(NewCondition {
            uuid: request.uuid.into(),
            name: request.name,
            multiplier: Multiplier::new(multiplier).or_400("multiplier must not be negative")?,
            description: request.description,
            display_order: request.display_order,
        })
    }
}

/// Create Condition Handler
#[endpoint(
    tags("catalog"),
    summary = "Create Condition",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Condition created"),
        (status_code = StatusCode::CONFLICT, description = "Condition already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateConditionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ConditionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let condition = NewCondition::try_from(json.into_inner())?;

    let created = state
        .app
        .catalog
        .create_condition(condition)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, "/catalog/conditions", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(
        condition_uuid = %created.uuid,
        multiplier = %created.multiplier,
        "created condition"
    );

    Ok(Json(created.into()))
}
