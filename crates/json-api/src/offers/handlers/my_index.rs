//! My Offers Index Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::*};

use tradein_app::domain::{pagination::Page, profiles::models::ProfileUuid};

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OffersResponse},
    state::State,
};

/// My Offers Index Handler
///
/// Lists the caller's offers, newest first.
#[endpoint(tags("offers"), summary = "List My Offers", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let page = Page::new(limit.into_inner(), offset.into_inner());

    let offers = state
        .app
        .offers
        .list_offers_for_profile(ProfileUuid::from_uuid(actor.profile), page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OffersResponse::new(offers, Timestamp::now())))
}
