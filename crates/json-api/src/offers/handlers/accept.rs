//! Accept Offer Handler

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
        models::{AcceptedOfferResponse, OfferActionRequest},
    },
    state::State,
};

/// Accept Offer Handler
///
/// Accepting places an order for the device in the `order_placed` state.
#[endpoint(
    tags("offers"),
    summary = "Accept Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer accepted and order placed"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::CONFLICT, description = "Offer already decided or edited concurrently"),
        (status_code = StatusCode::GONE, description = "Offer expired"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "offers.accept",
    skip(offer, json, depot),
    fields(offer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    json: JsonBody<OfferActionRequest>,
    depot: &mut Depot,
) -> Result<Json<AcceptedOfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let offer = offer.into_inner();

    tracing::Span::current().record("offer_uuid", tracing::field::display(offer));

    let accepted = state
        .app
        .offers
        .accept_offer(actor, offer.into(), json.into_inner().expected_version)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        offer_uuid = %offer,
        order_uuid = %accepted.order.uuid,
        "accepted offer"
    );

    Ok(Json(AcceptedOfferResponse::new(accepted, Timestamp::now())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tradein::{
        offers::{OfferStatus, OfferTransitionError},
        orders::OrderStatus,
    };
    use tradein_app::domain::{
        offers::{
            OffersServiceError,
            models::{AcceptedOffer, OfferUuid},
        },
        orders::models::OrderUuid,
        profiles::models::ProfileUuid,
    };

    use crate::{
        offers::models::fixtures::make_offer,
        orders::models::fixtures::make_order,
        test_helpers::{TEST_ADMIN, TestServices, admin_service, offers_mock},
    };

    use super::*;

    fn make_service(services: TestServices) -> Service {
        admin_service(
            services,
            Router::with_path("admin/offers/{offer}/accept").post(handler),
        )
    }

    #[tokio::test]
    async fn test_accept_places_order() -> TestResult {
        let uuid = OfferUuid::new();
        let profile = ProfileUuid::new();
        let mut offer = make_offer(uuid, profile)?;
        offer.status = OfferStatus::Accepted;
        offer.version = 4;

        let order_uuid = OrderUuid::new();
        let mut order = make_order(order_uuid, profile, OrderStatus::OrderPlaced);
        order.offer_uuid = uuid;

        let services = TestServices {
            offers: offers_mock(|offers| {
                offers
                    .expect_accept_offer()
                    .once()
                    .withf(move |actor, requested, version| {
                        *actor == TEST_ADMIN && *requested == uuid && *version == 3
                    })
                    .return_once(move |_, _, _| Ok(AcceptedOffer { offer, order }));
            }),
            ..TestServices::default()
        };

        let mut res = TestClient::post(format!("http://example.com/admin/offers/{uuid}/accept"))
            .json(&json!({ "expected_version": 3 }))
            .send(&make_service(services))
            .await;

        let body: AcceptedOfferResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.offer.status, "accepted");
        assert_eq!(body.order.uuid, order_uuid.into_uuid());
        assert_eq!(body.order.status, "order_placed");

        Ok(())
    }

    #[tokio::test]
    async fn test_accept_expired_offer_returns_410() -> TestResult {
        let uuid = OfferUuid::new();

        let services = TestServices {
            offers: offers_mock(|offers| {
                offers.expect_accept_offer().once().return_once(|_, _, _| {
                    Err(OfferTransitionError::Expired(Timestamp::UNIX_EPOCH).into())
                });
            }),
            ..TestServices::default()
        };

        let res = TestClient::post(format!("http://example.com/admin/offers/{uuid}/accept"))
            .json(&json!({ "expected_version": 1 }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::GONE));

        Ok(())
    }

    #[tokio::test]
    async fn test_accept_stale_version_returns_409() -> TestResult {
        let uuid = OfferUuid::new();

        let services = TestServices {
            offers: offers_mock(|offers| {
                offers.expect_accept_offer().once().return_once(|_, _, _| {
                    Err(OffersServiceError::Conflict {
                        expected: 1,
                        actual: 2,
                    })
                });
            }),
            ..TestServices::default()
        };

        let res = TestClient::post(format!("http://example.com/admin/offers/{uuid}/accept"))
            .json(&json!({ "expected_version": 1 }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
