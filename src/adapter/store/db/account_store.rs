//! Sqlite-backed account store.

use diesel::prelude::*;

use super::model::AccountRow;
use super::schema::accounts;
use super::DbPool;
use crate::domain::{Account, AccountId};
use crate::error::StoreError;
use crate::store::AccountStore;

/// Account lookup against the accounts table.
pub struct DbAccountStore {
    pool: DbPool,
}

impl DbAccountStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert or replace an account. Used for provisioning.
    pub fn upsert(&self, account: &Account) -> Result<(), StoreError> {
        let row = AccountRow::from_domain(account);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        diesel::replace_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}

impl AccountStore for DbAccountStore {
    fn find_account(&self, id: &AccountId) -> Result<Account, StoreError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let row: Option<AccountRow> = accounts::table
            .find(id.as_str())
            .first(&mut conn)
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(AccountRow::into_domain)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }
}
