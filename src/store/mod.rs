//! Persistence ports for accounts.

use crate::domain::{Account, AccountId};
use crate::error::StoreError;

/// Lookup of merchant accounts by identifier.
///
/// Absence is a hard failure ([`StoreError::NotFound`]), never a retry
/// condition: an order must resolve to exactly one account before any
/// remote call is attempted.
pub trait AccountStore: Send + Sync {
    fn find_account(&self, id: &AccountId) -> Result<Account, StoreError>;
}
