//! Order request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein::orders::OrderStatus;
use tradein_app::domain::orders::models::{Order, OrderDetails, OrderStatusEntry};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub offer_uuid: Uuid,
    pub profile_uuid: Uuid,
    pub status: String,

    /// Payout after inspection, in minor units
    pub final_price: Option<u64>,
    pub tracking_number: Option<String>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            offer_uuid: order.offer_uuid.into_uuid(),
            profile_uuid: order.profile_uuid.into_uuid(),
            status: order.status.as_str().to_string(),
            final_price: order.final_price,
            tracking_number: order.tracking_number,
            version: order.version,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<Order>> for OrdersResponse {
    fn from(orders: Vec<Order>) -> Self {
        Self {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order Status History Entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusEntryResponse {
    pub uuid: Uuid,

    /// `None` for the entry recorded when the order was placed
    pub from_status: Option<String>,
    pub to_status: String,
    pub changed_by: Option<Uuid>,

    /// Whether an administrator bypassed the forward-only sequence
    pub is_override: bool,
    pub created_at: String,
}

impl From<OrderStatusEntry> for OrderStatusEntryResponse {
    fn from(entry: OrderStatusEntry) -> Self {
        Self {
            uuid: entry.uuid.into_uuid(),
            from_status: entry.from_status.map(|status| status.as_str().to_string()),
            to_status: entry.to_status.as_str().to_string(),
            changed_by: entry.changed_by.map(|profile| profile.into_uuid()),
            is_override: entry.is_override,
            created_at: entry.created_at.to_string(),
        }
    }
}

/// Order Details Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailsResponse {
    pub order: OrderResponse,

    /// Status changes, oldest first
    pub history: Vec<OrderStatusEntryResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            order: details.order.into(),
            history: details.history.into_iter().map(Into::into).collect(),
        }
    }
}

/// Statuses in lifecycle order, for API documentation and clients.
pub(crate) fn status_names() -> Vec<&'static str> {
    OrderStatus::SEQUENCE.iter().map(|status| status.as_str()).collect()
}
