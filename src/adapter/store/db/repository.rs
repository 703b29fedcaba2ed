//! Order persistence with pre-commit synchronization.

use std::sync::Arc;

use diesel::prelude::*;
use tracing::debug;

use super::model::OrderRow;
use super::schema::orders;
use super::DbPool;
use crate::domain::{Order, OrderId};
use crate::error::{Result, StoreError};
use crate::sync::OrderSynchronizer;

/// Repository for orders. The explicit call site replacing
/// framework-dispatched lifecycle events: every create and update runs
/// the synchronizer first and persists only if it succeeded, so a
/// failed remote call leaves no local state behind.
pub struct OrderRepository {
    pool: DbPool,
    synchronizer: Arc<OrderSynchronizer>,
}

impl OrderRepository {
    pub fn new(pool: DbPool, synchronizer: Arc<OrderSynchronizer>) -> Self {
        Self { pool, synchronizer }
    }

    /// Synchronize and persist a new order.
    pub async fn create(&self, mut order: Order) -> Result<Order> {
        self.synchronizer.before_create(&mut order).await?;

        let row = OrderRow::from_domain(&order)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        diesel::insert_into(orders::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(order_id = %order.id(), "Order persisted");
        Ok(order)
    }

    /// Synchronize and persist changes to an existing order.
    pub async fn update(&self, mut order: Order) -> Result<Order> {
        self.synchronizer.before_update(&mut order).await?;

        let row = OrderRow::from_domain(&order)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let affected = diesel::update(orders::table.find(&row.id))
            .set(&row)
            .execute(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if affected == 0 {
            return Err(StoreError::NotFound {
                id: order.id().to_string(),
            }
            .into());
        }

        debug!(order_id = %order.id(), "Order changes persisted");
        Ok(order)
    }

    /// Load an order from its last committed state.
    pub fn find(&self, id: &OrderId) -> Result<Order> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let row: Option<OrderRow> = orders::table
            .find(id.as_str())
            .first(&mut conn)
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let row = row.ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        Ok(row.into_domain()?)
    }
}
