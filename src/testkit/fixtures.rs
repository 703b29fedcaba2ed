//! Builders for domain fixtures.

use rust_decimal::Decimal;

use crate::domain::{Account, LineItem, OAuthCredentials, Order};

/// An account with throwaway credentials.
pub fn account(id: &str) -> Account {
    Account::new(
        id,
        format!("Merchant {id}"),
        OAuthCredentials::new(format!("client-{id}"), "test-secret"),
    )
}

/// A pending, unsynced order with a single line item.
pub fn order(id: &str, account_id: &str, amount: Decimal) -> Order {
    Order::try_new(
        id,
        account_id,
        amount,
        vec![LineItem::new("SKU-1", 1, amount)],
    )
    .expect("fixture order must be valid")
}
