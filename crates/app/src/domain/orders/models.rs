//! Order Models

use jiff::Timestamp;
use tradein::orders::{OrderStatus, TransitionMode};

use crate::{
    domain::{offers::models::OfferUuid, pagination::Page, profiles::models::ProfileUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Status Entry UUID
pub type OrderStatusEntryUuid = TypedUuid<OrderStatusEntry>;

/// A device on its way from the customer to payout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub offer_uuid: OfferUuid,
    pub profile_uuid: ProfileUuid,
    pub status: OrderStatus,
    pub final_price: Option<u64>,
    pub tracking_number: Option<String>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub offer_uuid: OfferUuid,
    pub profile_uuid: ProfileUuid,
}

/// Requested status change for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub mode: TransitionMode,
    pub expected_version: i64,
    pub tracking_number: Option<String>,
}

/// Final payout amount decided after inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalPrice {
    pub final_price: u64,
    pub expected_version: i64,
}

/// One step in an order's status audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatusEntry {
    pub uuid: OrderStatusEntryUuid,
    pub order_uuid: OrderUuid,
    pub from_status: Option<OrderStatus>,
    pub to_status: OrderStatus,
    pub changed_by: Option<ProfileUuid>,
    pub is_override: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewOrderStatusEntry {
    pub uuid: OrderStatusEntryUuid,
    pub order_uuid: OrderUuid,
    pub from_status: Option<OrderStatus>,
    pub to_status: OrderStatus,
    pub changed_by: Option<ProfileUuid>,
    pub is_override: bool,
}

/// An order with its status history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub order: Order,
    pub history: Vec<OrderStatusEntry>,
}

/// Order listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub page: Page,
}
