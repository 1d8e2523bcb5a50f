//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};
use tradein::{
    orders::{TransitionKind, check_transition},
    roles::Actor,
};

use crate::{
    database::Db,
    domain::{
        orders::{
            errors::OrdersServiceError,
            models::{
                FinalPrice, NewOrderStatusEntry, Order, OrderDetails, OrderFilter,
                OrderStatusEntryUuid, OrderUuid, StatusChange,
            },
            repository::PgOrdersRepository,
        },
        pagination::Page,
        profiles::models::ProfileUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

fn require_admin(actor: &Actor) -> Result<(), OrdersServiceError> {
    if actor.role.is_admin() {
        Ok(())
    } else {
        Err(OrdersServiceError::Forbidden)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders_for_profile(
        &self,
        profile: ProfileUuid,
        page: Page,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .repository
            .list_orders_for_profile(&mut tx, profile, page)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .repository
            .list_orders(&mut tx, filter.status, filter.page)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.repository.get_order(&mut tx, order).await?;
        let history = self.repository.list_history(&mut tx, order.uuid).await?;

        tx.commit().await?;

        Ok(OrderDetails { order, history })
    }

    async fn change_status(
        &self,
        actor: Actor,
        order: OrderUuid,
        change: StatusChange,
    ) -> Result<Order, OrdersServiceError> {
        require_admin(&actor)?;

        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        if current.version != change.expected_version {
            warn!(
                %order,
                expected = change.expected_version,
                actual = current.version,
                "stale order version"
            );

            return Err(OrdersServiceError::Conflict {
                expected: change.expected_version,
                actual: current.version,
            });
        }

        let kind = check_transition(current.status, change.status, change.mode).inspect_err(
            |rejected| {
                warn!(
                    %order,
                    from = %current.status,
                    to = %change.status,
                    "order transition rejected: {rejected}"
                );
            },
        )?;

        let updated = self
            .repository
            .update_status(
                &mut tx,
                order,
                change.status,
                change.tracking_number,
                change.expected_version,
            )
            .await?
            .ok_or(OrdersServiceError::Conflict {
                expected: change.expected_version,
                actual: current.version,
            })?;

        let is_override = kind == TransitionKind::Override;

        self.repository
            .create_history_entry(
                &mut tx,
                NewOrderStatusEntry {
                    uuid: OrderStatusEntryUuid::new(),
                    order_uuid: order,
                    from_status: Some(current.status),
                    to_status: updated.status,
                    changed_by: Some(ProfileUuid::from_uuid(actor.profile)),
                    is_override,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            %order,
            from = %current.status,
            to = %updated.status,
            is_override,
            actor = %actor.profile,
            "order status changed"
        );

        Ok(updated)
    }

    async fn set_final_price(
        &self,
        actor: Actor,
        order: OrderUuid,
        price: FinalPrice,
    ) -> Result<Order, OrdersServiceError> {
        require_admin(&actor)?;

        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        if current.version != price.expected_version {
            return Err(OrdersServiceError::Conflict {
                expected: price.expected_version,
                actual: current.version,
            });
        }

        if !current.status.accepts_final_price() {
            warn!(%order, status = %current.status, "final price rejected for order status");

            return Err(OrdersServiceError::FinalPriceNotAllowed(current.status));
        }

        let updated = self
            .repository
            .set_final_price(&mut tx, order, price.final_price, price.expected_version)
            .await?
            .ok_or(OrdersServiceError::Conflict {
                expected: price.expected_version,
                actual: current.version,
            })?;

        tx.commit().await?;

        info!(
            %order,
            final_price = price.final_price,
            actor = %actor.profile,
            "order final price set"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Orders belonging to a profile, newest first.
    async fn list_orders_for_profile(
        &self,
        profile: ProfileUuid,
        page: Page,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// All orders, optionally filtered by status, newest first.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve an order with its status history.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetails, OrdersServiceError>;

    /// Move an order to a new status.
    ///
    /// Strict changes must advance exactly one step; overrides may jump anywhere else and are
    /// flagged in the history.
    async fn change_status(
        &self,
        actor: Actor,
        order: OrderUuid,
        change: StatusChange,
    ) -> Result<Order, OrdersServiceError>;

    /// Record the final payout amount after inspection.
    async fn set_final_price(
        &self,
        actor: Actor,
        order: OrderUuid,
        price: FinalPrice,
    ) -> Result<Order, OrdersServiceError>;
}
