//! Get My Offer Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use tradein_app::domain::profiles::models::ProfileUuid;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OfferResponse},
    state::State,
};

/// Get My Offer Handler
///
/// Offers belonging to someone else are reported as not found.
#[endpoint(
    tags("offers"),
    summary = "Get My Offer",
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
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let offer = state
        .app
        .offers
        .get_offer_for_profile(ProfileUuid::from_uuid(actor.profile), offer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OfferResponse::new(offer, Timestamp::now())))
}
