//! Change Order Status Handler

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

use tradein::orders::{OrderStatus, TransitionMode};
use tradein_app::domain::orders::models::StatusChange;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, status_names},
    },
    state::State,
};

/// Change Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChangeStatusRequest {
    /// Target status, e.g. `device_shipped`
    pub status: String,

    /// Bypass the forward-only sequence; the change is flagged in the history
    #[serde(default, rename = "override")]
    pub is_override: bool,
    pub expected_version: i64,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

impl TryFrom<ChangeStatusRequest> for StatusChange {
    type Error = StatusError;

    fn try_from(request: ChangeStatusRequest) -> Result<Self, Self::Error> {
        let status = request.status.parse::<OrderStatus>().map_err(|_unknown| {
            StatusError::bad_request()
                .brief("Unknown order status")
                .detail(format!("expected one of: {}", status_names().join(", ")))
        })?;

        let mode = if request.is_override {
            TransitionMode::Override
        } else {
            TransitionMode::Strict
        };

        Ok(StatusChange {
            status,
            mode,
            expected_version: request.expected_version,
            tracking_number: request.tracking_number,
        })
    }
}

/// Change Order Status Handler
///
/// Without `override`, the order may only advance to the next status in its lifecycle.
#[endpoint(
    tags("orders"),
    summary = "Change Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed or order edited concurrently"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.status.change",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, to_status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<ChangeStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let change = StatusChange::try_from(json.into_inner())?;
    let order = order.into_inner();

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("to_status", change.status.as_str());

    let mode = change.mode;

    let updated = state
        .app
        .orders
        .change_status(actor, order.into(), change)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        order_uuid = %order,
        status = updated.status.as_str(),
        is_override = mode == TransitionMode::Override,
        "changed order status"
    );

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tradein::orders::OrderTransitionError;
    use tradein_app::domain::{orders::models::OrderUuid, profiles::models::ProfileUuid};

    use crate::{
        orders::models::fixtures::make_order,
        test_helpers::{TEST_ADMIN, TestServices, admin_service, orders_mock},
    };

    use super::*;

    fn make_service(services: TestServices) -> Service {
        admin_service(
            services,
            Router::with_path("admin/orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_strict_advance_with_tracking_number() -> TestResult {
        let uuid = OrderUuid::new();
        let mut order = make_order(uuid, ProfileUuid::new(), OrderStatus::DeviceShipped);
        order.tracking_number = Some("1Z999".to_string());
        order.version = 2;

        let services = TestServices {
            orders: orders_mock(|orders| {
                orders
                    .expect_change_status()
                    .once()
                    .withf(move |actor, requested, change| {
                        *actor == TEST_ADMIN
                            && *requested == uuid
                            && change.status == OrderStatus::DeviceShipped
                            && change.mode == TransitionMode::Strict
                            && change.tracking_number.as_deref() == Some("1Z999")
                    })
                    .return_once(move |_, _, _| Ok(order));
            }),
            ..TestServices::default()
        };

        let mut res = TestClient::put(format!("http://example.com/admin/orders/{uuid}/status"))
            .json(&json!({
                "status": "device_shipped",
                "expected_version": 1,
                "tracking_number": "1Z999",
            }))
            .send(&make_service(services))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "device_shipped");
        assert_eq!(body.tracking_number.as_deref(), Some("1Z999"));

        Ok(())
    }

    #[tokio::test]
    async fn test_override_flag_selects_override_mode() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, ProfileUuid::new(), OrderStatus::OrderPlaced);

        let services = TestServices {
            orders: orders_mock(|orders| {
                orders
                    .expect_change_status()
                    .once()
                    .withf(|_, _, change| {
                        change.status == OrderStatus::OrderPlaced
                            && change.mode == TransitionMode::Override
                    })
                    .return_once(move |_, _, _| Ok(order));
            }),
            ..TestServices::default()
        };

        let res = TestClient::put(format!("http://example.com/admin/orders/{uuid}/status"))
            .json(&json!({
                "status": "order_placed",
                "override": true,
                "expected_version": 3,
            }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_skipping_steps_returns_409() -> TestResult {
        let uuid = OrderUuid::new();

        let services = TestServices {
            orders: orders_mock(|orders| {
                orders.expect_change_status().once().return_once(|_, _, _| {
                    Err(OrderTransitionError::SkipsSteps {
                        from: OrderStatus::OrderPlaced,
                        to: OrderStatus::PayoutComplete,
                        expected: OrderStatus::DeviceShipped,
                    }
                    .into())
                });
            }),
            ..TestServices::default()
        };

        let res = TestClient::put(format!("http://example.com/admin/orders/{uuid}/status"))
            .json(&json!({ "status": "payout_complete", "expected_version": 1 }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let uuid = OrderUuid::new();

        let mut res = TestClient::put(format!("http://example.com/admin/orders/{uuid}/status"))
            .json(&json!({ "status": "teleported", "expected_version": 1 }))
            .send(&make_service(TestServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body = res.take_string().await?;

        assert!(body.contains("Unknown order status"), "{body}");

        Ok(())
    }
}
