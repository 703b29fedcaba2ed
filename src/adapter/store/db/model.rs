//! Database model types for Diesel ORM.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::{accounts, orders};
use crate::domain::{
    Account, AccountId, LineItem, OAuthCredentials, Order, OrderId, OrderStatus, RemoteRef,
    SyncState,
};
use crate::error::StoreError;

/// Database row for a merchant account.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountRow {
    pub id: String,
    pub merchant_name: String,
    pub client_id: String,
    pub client_secret: String,
}

impl AccountRow {
    pub fn from_domain(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            merchant_name: account.merchant_name().to_string(),
            client_id: account.credentials().client_id.clone(),
            client_secret: account.credentials().client_secret.clone(),
        }
    }

    pub fn into_domain(self) -> Account {
        Account::new(
            AccountId::new(self.id),
            self.merchant_name,
            OAuthCredentials::new(self.client_id, self.client_secret),
        )
    }
}

/// Database row for an order. Decimals and timestamps are stored as
/// text; line items as a JSON document.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: String,
    pub account_id: String,
    pub amount: String,
    pub status: String,
    pub items: String,
    pub remote_ref: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl OrderRow {
    pub fn from_domain(order: &Order) -> Result<Self, StoreError> {
        let items = serde_json::to_string(order.items())
            .map_err(|e| StoreError::Database(format!("failed to encode items: {e}")))?;

        Ok(Self {
            id: order.id().to_string(),
            account_id: order.account_id().to_string(),
            amount: order.amount().to_string(),
            status: status_to_str(order.status()).to_string(),
            items,
            remote_ref: order.remote_ref().map(|r| r.to_string()),
            created_at: order.created_at().to_rfc3339(),
            updated_at: order.updated_at().to_rfc3339(),
        })
    }

    pub fn into_domain(self) -> Result<Order, StoreError> {
        let amount = Decimal::from_str(&self.amount)
            .map_err(|e| StoreError::Database(format!("bad amount '{}': {e}", self.amount)))?;
        let status = status_from_str(&self.status)?;
        let items: Vec<LineItem> = serde_json::from_str(&self.items)
            .map_err(|e| StoreError::Database(format!("failed to decode items: {e}")))?;
        let sync = match self.remote_ref {
            Some(remote_ref) => SyncState::Synced(RemoteRef::new(remote_ref)),
            None => SyncState::Unsynced,
        };

        Ok(Order::from_parts(
            OrderId::new(self.id),
            AccountId::new(self.account_id),
            amount,
            status,
            items,
            sync,
            parse_timestamp(&self.created_at)?,
            parse_timestamp(&self.updated_at)?,
        ))
    }
}

fn status_to_str(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "pending",
        OrderStatus::Confirmed => "confirmed",
        OrderStatus::Cancelled => "cancelled",
    }
}

fn status_from_str(value: &str) -> Result<OrderStatus, StoreError> {
    match value {
        "pending" => Ok(OrderStatus::Pending),
        "confirmed" => Ok(OrderStatus::Confirmed),
        "cancelled" => Ok(OrderStatus::Cancelled),
        other => Err(StoreError::Database(format!("unknown status '{other}'"))),
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Database(format!("bad timestamp '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn order_row_round_trips() {
        let mut order = Order::try_new(
            "1",
            "A1",
            dec!(99.50),
            vec![LineItem::new("SKU-1", 2, dec!(49.75))],
        )
        .unwrap();
        order.mark_synced(RemoteRef::new("RMT-1"));

        let row = OrderRow::from_domain(&order).unwrap();
        let loaded = row.into_domain().unwrap();

        assert_eq!(loaded, order);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(status_from_str("shipped").is_err());
    }
}
