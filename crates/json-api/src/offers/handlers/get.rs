//! Admin Get Offer Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OfferDetailsResponse},
    state::State,
};

/// Admin Get Offer Handler
///
/// Returns an offer with its price revision trail.
#[endpoint(
    tags("offers"),
    summary = "Get Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer found"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OfferDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details = state
        .app
        .offers
        .get_offer(offer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OfferDetailsResponse::new(details, Timestamp::now())))
}
