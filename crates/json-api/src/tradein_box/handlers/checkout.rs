//! Checkout Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tradein::{
    tradein_box::{BoxItem, TradeInBox},
    validation::{ShippingDetails, ValidationErrors},
};
use tradein_app::domain::{
    offers::models::{NewOffer, OfferUuid},
    profiles::models::ProfileUuid,
    quotes::models::QuoteRequest,
};

use crate::{
    extensions::*,
    offers::{
        self,
        models::{OfferResponse, ShippingBody},
    },
    state::State,
    tradein_box::errors::into_status_error,
    validation,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// Shared by every offer submitted from the box
    pub shipping: ShippingBody,
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    pub offers: Vec<OfferResponse>,
}

/// Checkout Handler
///
/// Submits every item as an offer in one transaction. The items leave the box
/// before submission so concurrent checkouts of one session cannot submit them
/// twice; if submission fails they are put back and no offer is created.
#[endpoint(
    tags("box"),
    summary = "Checkout Trade-in Box",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Every item submitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing session"),
        (status_code = StatusCode::NOT_FOUND, description = "An item refers to a missing catalog entry"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Empty box or invalid shipping details"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "box.checkout",
    skip(json, depot, res),
    fields(session = tracing::field::Empty, items = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let session = depot.session_or_400()?;

    let shipping = ShippingDetails::from(json.into_inner().shipping);

    shipping
        .validate()
        .map_err(|errors| validation::into_status_error(&errors))?;

    let mut tradein_box = TradeInBox::new(state.boxes.session(session));
    let items = tradein_box.take_items().map_err(into_status_error)?;

    let span = tracing::Span::current();

    span.record("session", tracing::field::display(session));
    span.record("items", items.len());

    if items.is_empty() {
        return Err(validation::into_status_error(&ValidationErrors::single(
            "items",
            "box is empty",
        )));
    }

    let profile = ProfileUuid::from_uuid(actor.profile);
    let submissions = items
        .iter()
        .map(|item| new_offer(item, shipping.clone()))
        .collect();

    let submitted = match state.app.offers.submit_offers(profile, submissions).await {
        Ok(submitted) => submitted,
        Err(error) => {
            if let Err(restore_error) = tradein_box.restore_items(items) {
                tracing::error!("failed to return items to the box: {restore_error}");
            }

            return Err(offers::errors::into_status_error(error));
        }
    };

    tracing::info!(submitted = submitted.len(), "checked out trade-in box");

    let now = Timestamp::now();

    res.status_code(StatusCode::CREATED);

    Ok(Json(CheckoutResponse {
        offers: submitted
            .into_iter()
            .map(|offer| OfferResponse::new(offer, now))
            .collect(),
    }))
}

fn new_offer(item: &BoxItem, shipping: ShippingDetails) -> NewOffer {
    let selection = &item.selection;

    NewOffer {
        uuid: OfferUuid::new(),
        request: QuoteRequest {
            model: selection.model.into(),
            condition: Some(selection.condition.into()),
            carrier: selection.carrier.map(Into::into),
            storage: selection.storage.map(Into::into),
            has_box: selection.has_box,
            has_charger: selection.has_charger,
        },
        shipping,
    }
}
