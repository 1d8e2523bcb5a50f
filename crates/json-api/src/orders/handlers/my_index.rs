//! My Orders Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use tradein_app::domain::{pagination::Page, profiles::models::ProfileUuid};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersResponse},
    state::State,
};

/// My Orders Index Handler
#[endpoint(tags("orders"), summary = "List My Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders_for_profile(
            ProfileUuid::from_uuid(actor.profile),
            Page::new(limit.into_inner(), offset.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tradein::orders::OrderStatus;
    use tradein_app::domain::orders::models::OrderUuid;

    use crate::{
        orders::models::fixtures::make_order,
        test_helpers::{TEST_USER_UUID, TestServices, orders_mock, user_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_lists_callers_orders() -> TestResult {
        let profile = ProfileUuid::from_uuid(TEST_USER_UUID);
        let order = make_order(OrderUuid::new(), profile, OrderStatus::DeviceShipped);

        let services = TestServices {
            orders: orders_mock(|orders| {
                orders
                    .expect_list_orders_for_profile()
                    .once()
                    .withf(move |owner, page| *owner == profile && page.offset == 0)
                    .return_once(move |_, _| Ok(vec![order]));
            }),
            ..TestServices::default()
        };

        let mut res = TestClient::get("http://example.com/me/orders")
            .send(&user_service(
                services,
                Router::with_path("me/orders").get(handler),
            ))
            .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.orders.first().map(|order| order.status.as_str()),
            Some("device_shipped")
        );

        Ok(())
    }
}
