//! Local trade order and its synchronization state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::{AccountId, OrderId, RemoteRef};

/// Lifecycle status of the local order, independent of sync state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Whether the order has a counterpart on the trade platform yet.
///
/// `Unsynced` orders have never been accepted remotely; a successful
/// create moves them to `Synced` carrying the platform's reference.
/// Failed attempts never change this state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "remote_ref", rename_all = "lowercase")]
pub enum SyncState {
    Unsynced,
    Synced(RemoteRef),
}

impl SyncState {
    #[must_use]
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncState::Synced(_))
    }

    /// The remote reference, if the order has one.
    #[must_use]
    pub fn remote_ref(&self) -> Option<&RemoteRef> {
        match self {
            SyncState::Synced(remote_ref) => Some(remote_ref),
            SyncState::Unsynced => None,
        }
    }
}

/// A single line item on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(sku: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            unit_price,
        }
    }
}

/// The order fields sent to the trade platform on create and update.
///
/// A borrowed view over an [`Order`]; the client adapter serializes it
/// into the platform's wire format.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload<'a> {
    pub order_id: &'a OrderId,
    pub amount: Decimal,
    pub status: OrderStatus,
    pub items: &'a [LineItem],
}

/// A local trade order mirrored on the remote platform.
///
/// Created and mutated by application code; the synchronizer observes
/// create/update transitions and assigns the remote reference, but does
/// not own the order's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    account_id: AccountId,
    amount: Decimal,
    status: OrderStatus,
    items: Vec<LineItem>,
    sync: SyncState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new unsynced order, validating domain invariants.
    pub fn try_new(
        id: impl Into<OrderId>,
        account_id: impl Into<AccountId>,
        amount: Decimal,
        items: Vec<LineItem>,
    ) -> Result<Self, DomainError> {
        let account_id = account_id.into();

        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount { amount });
        }
        if account_id.as_str().is_empty() {
            return Err(DomainError::EmptyAccountId);
        }
        if items.is_empty() {
            return Err(DomainError::EmptyItems);
        }

        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            account_id,
            amount,
            status: OrderStatus::Pending,
            items,
            sync: SyncState::Unsynced,
            created_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    #[must_use]
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    /// The remote reference, if this order has been synced.
    #[must_use]
    pub fn remote_ref(&self) -> Option<&RemoteRef> {
        self.sync.remote_ref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The wire-facing view of this order.
    #[must_use]
    pub fn payload(&self) -> OrderPayload<'_> {
        OrderPayload {
            order_id: &self.id,
            amount: self.amount,
            status: self.status,
            items: &self.items,
        }
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn set_amount(&mut self, amount: Decimal) -> Result<(), DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount { amount });
        }
        self.amount = amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record a successful sync by attaching the platform's reference.
    ///
    /// Called by the synchronizer only after the remote call succeeded.
    pub fn mark_synced(&mut self, remote_ref: RemoteRef) {
        self.sync = SyncState::Synced(remote_ref);
        self.updated_at = Utc::now();
    }

    /// Reassemble a previously persisted order. Bypasses validation;
    /// the stored row already passed it.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: OrderId,
        account_id: AccountId,
        amount: Decimal,
        status: OrderStatus,
        items: Vec<LineItem>,
        sync: SyncState,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            amount,
            status,
            items,
            sync,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item() -> LineItem {
        LineItem::new("SKU-1", 1, dec!(100))
    }

    #[test]
    fn try_new_rejects_non_positive_amount() {
        let result = Order::try_new("1", "A1", dec!(0), vec![item()]);
        assert!(matches!(
            result,
            Err(DomainError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn try_new_rejects_empty_account_id() {
        let result = Order::try_new("1", "", dec!(100), vec![item()]);
        assert!(matches!(result, Err(DomainError::EmptyAccountId)));
    }

    #[test]
    fn try_new_rejects_empty_items() {
        let result = Order::try_new("1", "A1", dec!(100), vec![]);
        assert!(matches!(result, Err(DomainError::EmptyItems)));
    }

    #[test]
    fn new_orders_start_unsynced() {
        let order = Order::try_new("1", "A1", dec!(100), vec![item()]).unwrap();
        assert!(!order.sync_state().is_synced());
        assert_eq!(order.remote_ref(), None);
    }

    #[test]
    fn mark_synced_attaches_remote_ref() {
        let mut order = Order::try_new("1", "A1", dec!(100), vec![item()]).unwrap();
        order.mark_synced(RemoteRef::new("RMT-1"));
        assert_eq!(order.remote_ref().map(RemoteRef::as_str), Some("RMT-1"));
    }
}
