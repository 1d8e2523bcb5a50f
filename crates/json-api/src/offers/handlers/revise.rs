//! Revise Offer Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein_app::domain::offers::models::PriceRevision;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OfferResponse},
    state::State,
};

/// Revise Offer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviseOfferRequest {
    /// New offer in minor units
    pub new_price: u64,
    #[serde(default)]
    pub reason: Option<String>,
    pub expected_version: i64,
}

impl From<ReviseOfferRequest> for PriceRevision {
    fn from(request: ReviseOfferRequest) -> Self {
        PriceRevision {
            new_price: request.new_price,
            reason: request.reason,
            expected_version: request.expected_version,
        }
    }
}

/// Revise Offer Handler
///
/// Records the previous and new price and leaves the offer open for a decision.
#[endpoint(
    tags("offers"),
    summary = "Revise Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer revised"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::CONFLICT, description = "Offer already decided or edited concurrently"),
        (status_code = StatusCode::GONE, description = "Offer expired"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid price"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "offers.revise",
    skip(offer, json, depot),
    fields(offer_uuid = tracing::field::Empty, new_price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    json: JsonBody<ReviseOfferRequest>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();
    let offer = offer.into_inner();

    let span = tracing::Span::current();

    span.record("offer_uuid", tracing::field::display(offer));
    span.record("new_price", request.new_price);

    let revised = state
        .app
        .offers
        .revise_offer(actor, offer.into(), request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        offer_uuid = %offer,
        previous_price = revised.original_quoted_price,
        new_price = revised.quoted_price,
        "revised offer"
    );

    Ok(Json(OfferResponse::new(revised, Timestamp::now())))
}
