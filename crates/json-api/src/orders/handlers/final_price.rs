//! Set Final Price Handler

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

use tradein_app::domain::orders::models::FinalPrice;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Set Final Price Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FinalPriceRequest {
    /// Payout in minor units
    pub final_price: u64,
    pub expected_version: i64,
}

impl From<FinalPriceRequest> for FinalPrice {
    fn from(request: FinalPriceRequest) -> Self {
        FinalPrice {
            final_price: request.final_price,
            expected_version: request.expected_version,
        }
    }
}

/// Set Final Price Handler
///
/// Only allowed once the device has been received.
#[endpoint(
    tags("orders"),
    summary = "Set Final Price",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Final price recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order not yet inspected or edited concurrently"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<FinalPriceRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let order = order.into_inner();

    let updated = state
        .app
        .orders
        .set_final_price(actor, order.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order, final_price = ?updated.final_price, "set final price");

    Ok(Json(updated.into()))
}
