//! Decline Offer Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    offers::{
        errors::into_status_error,
        models::{OfferActionRequest, OfferResponse},
    },
    state::State,
};

/// Decline Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Decline Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer declined"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::CONFLICT, description = "Offer already decided or edited concurrently"),
        (status_code = StatusCode::GONE, description = "Offer expired"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    json: JsonBody<OfferActionRequest>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let offer = offer.into_inner();

    let declined = state
        .app
        .offers
        .decline_offer(actor, offer.into(), json.into_inner().expected_version)
        .await
        .map_err(into_status_error)?;

    tracing::info!(offer_uuid = %offer, "declined offer");

    Ok(Json(OfferResponse::new(declined, Timestamp::now())))
}
