//! In-memory account store.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{Account, AccountId};
use crate::error::StoreError;
use crate::store::AccountStore;

/// Account store backed by a map. Intended for tests and small
/// deployments where accounts are provisioned at startup.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl MemoryAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, account: Account) {
        self.accounts
            .write()
            .insert(account.id().clone(), account);
    }
}

impl AccountStore for MemoryAccountStore {
    fn find_account(&self, id: &AccountId) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OAuthCredentials;

    #[test]
    fn find_returns_inserted_account() {
        let store = MemoryAccountStore::new();
        store.insert(Account::new(
            "A1",
            "Merchant",
            OAuthCredentials::new("id", "secret"),
        ));

        let account = store.find_account(&AccountId::new("A1")).unwrap();
        assert_eq!(account.merchant_name(), "Merchant");
    }

    #[test]
    fn missing_account_is_not_found() {
        let store = MemoryAccountStore::new();
        let err = store.find_account(&AccountId::new("A2")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
