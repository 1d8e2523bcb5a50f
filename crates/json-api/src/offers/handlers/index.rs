//! Admin Offer Index Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::*};

use tradein::offers::OfferStatus;
use tradein_app::domain::{offers::models::OfferFilter, pagination::Page};

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OffersResponse},
    state::State,
};

/// Admin Offer Index Handler
///
/// Lists every offer, optionally filtered by stored status.
#[endpoint(
    tags("offers"),
    summary = "List Offers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offers listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = OfferFilter {
        status: status.into_status_filter::<OfferStatus>()?,
        page: Page::new(limit.into_inner(), offset.into_inner()),
    };

    let offers = state
        .app
        .offers
        .list_offers(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OffersResponse::new(offers, Timestamp::now())))
}
