//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use tradein::orders::OrderStatus;

use crate::{
    database::{optional_price_from_row, price_column},
    domain::{
        offers::models::OfferUuid,
        orders::models::{
            NewOrder, NewOrderStatusEntry, Order, OrderStatusEntry, OrderStatusEntryUuid,
            OrderUuid,
        },
        pagination::Page,
        profiles::models::ProfileUuid,
    },
};

const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDERS_FOR_PROFILE_SQL: &str = include_str!("sql/list_orders_for_profile.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const SET_FINAL_PRICE_SQL: &str = include_str!("sql/set_final_price.sql");
const CREATE_HISTORY_ENTRY_SQL: &str = include_str!("sql/create_history_entry.sql");
const LIST_HISTORY_SQL: &str = include_str!("sql/list_history.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an order and hold a row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<OrderStatus>,
        page: Page,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(status.map(OrderStatus::as_str))
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_for_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        page: Page,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_FOR_PROFILE_SQL)
            .bind(profile.into_uuid())
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.offer_uuid.into_uuid())
            .bind(order.profile_uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Create an order in `order_placed` and record the initial history entry.
    pub(crate) async fn place_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
        placed_by: ProfileUuid,
    ) -> Result<Order, sqlx::Error> {
        let order = self.create_order(tx, order).await?;

        self.create_history_entry(
            tx,
            NewOrderStatusEntry {
                uuid: OrderStatusEntryUuid::new(),
                order_uuid: order.uuid,
                from_status: None,
                to_status: order.status,
                changed_by: Some(placed_by),
                is_override: false,
            },
        )
        .await?;

        Ok(order)
    }

    /// Returns `None` when `expected_version` is stale.
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        tracking_number: Option<String>,
        expected_version: i64,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(tracking_number)
            .bind(expected_version)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Returns `None` when `expected_version` is stale.
    pub(crate) async fn set_final_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        final_price: u64,
        expected_version: i64,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(SET_FINAL_PRICE_SQL)
            .bind(order.into_uuid())
            .bind(price_column(final_price, "final_price")?)
            .bind(expected_version)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_history_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: NewOrderStatusEntry,
    ) -> Result<OrderStatusEntry, sqlx::Error> {
        query_as::<Postgres, OrderStatusEntry>(CREATE_HISTORY_ENTRY_SQL)
            .bind(entry.uuid.into_uuid())
            .bind(entry.order_uuid.into_uuid())
            .bind(entry.from_status.map(OrderStatus::as_str))
            .bind(entry.to_status.as_str())
            .bind(entry.changed_by.map(ProfileUuid::into_uuid))
            .bind(entry.is_override)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_history(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderStatusEntry>, sqlx::Error> {
        query_as::<Postgres, OrderStatusEntry>(LIST_HISTORY_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

fn status_from_row(row: &PgRow, column: &str) -> sqlx::Result<OrderStatus> {
    row.try_get::<String, _>(column)?
        .parse::<OrderStatus>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            offer_uuid: OfferUuid::from_uuid(row.try_get("offer_uuid")?),
            profile_uuid: ProfileUuid::from_uuid(row.try_get("profile_uuid")?),
            status: status_from_row(row, "status")?,
            final_price: optional_price_from_row(row, "final_price")?,
            tracking_number: row.try_get("tracking_number")?,
            version: row.try_get("version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderStatusEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let from_status = match row.try_get::<Option<String>, _>("from_status")? {
            Some(_) => Some(status_from_row(row, "from_status")?),
            None => None,
        };

        Ok(Self {
            uuid: OrderStatusEntryUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            from_status,
            to_status: status_from_row(row, "to_status")?,
            changed_by: row
                .try_get::<Option<uuid::Uuid>, _>("changed_by")?
                .map(ProfileUuid::from_uuid),
            is_override: row.try_get("is_override")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
