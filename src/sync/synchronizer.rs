//! Pre-commit synchronization of local orders with the trade platform.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::client::TradeClient;
use crate::domain::{Account, AccountId, Order};
use crate::error::{StoreError, SyncError};
use crate::store::AccountStore;

/// What to do when an update arrives for an order that was never
/// created remotely.
///
/// The host chooses at construction time; there is no implicit
/// behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRemoteRefPolicy {
    /// Log and leave the order untouched.
    #[default]
    Skip,
    /// Treat the update as an implicit create.
    Create,
    /// Fail the operation with [`SyncError::NotSynced`].
    Reject,
}

/// Synchronizes order state with the remote trade platform before the
/// local transaction commits.
///
/// Stateless aside from its injected collaborators. On any failure the
/// in-flight order is left exactly as it was, so the caller can abort
/// the enclosing transaction without partial state.
pub struct OrderSynchronizer {
    client: Arc<dyn TradeClient>,
    accounts: Arc<dyn AccountStore>,
    policy: MissingRemoteRefPolicy,
}

impl OrderSynchronizer {
    pub fn new(client: Arc<dyn TradeClient>, accounts: Arc<dyn AccountStore>) -> Self {
        Self {
            client,
            accounts,
            policy: MissingRemoteRefPolicy::default(),
        }
    }

    /// Override the policy for updates without a remote reference.
    #[must_use]
    pub fn with_policy(mut self, policy: MissingRemoteRefPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Synchronize a new order before it is first persisted.
    ///
    /// Resolves the account, creates the order remotely, and attaches
    /// the returned remote reference. The order is only mutated after
    /// the remote call succeeded.
    pub async fn before_create(&self, order: &mut Order) -> Result<(), SyncError> {
        let account = self.resolve_account(order.account_id())?;

        let remote_ref = self.client.create_order(&account, order.payload()).await?;

        info!(
            order_id = %order.id(),
            remote_ref = %remote_ref,
            platform = self.client.platform_name(),
            "Order created remotely"
        );
        order.mark_synced(remote_ref);
        Ok(())
    }

    /// Synchronize a changed order before the change is persisted.
    ///
    /// Orders without a prior remote reference are handled per the
    /// configured [`MissingRemoteRefPolicy`].
    pub async fn before_update(&self, order: &mut Order) -> Result<(), SyncError> {
        let account = self.resolve_account(order.account_id())?;

        let Some(remote_ref) = order.remote_ref().cloned() else {
            return self.handle_missing_ref(&account, order).await;
        };

        let remote_ref = self
            .client
            .update_order(&account, &remote_ref, order.payload())
            .await?;

        info!(
            order_id = %order.id(),
            remote_ref = %remote_ref,
            platform = self.client.platform_name(),
            "Order updated remotely"
        );
        order.mark_synced(remote_ref);
        Ok(())
    }

    async fn handle_missing_ref(
        &self,
        account: &Account,
        order: &mut Order,
    ) -> Result<(), SyncError> {
        match self.policy {
            MissingRemoteRefPolicy::Skip => {
                warn!(
                    order_id = %order.id(),
                    "Update on an order with no remote reference, skipping sync"
                );
                Ok(())
            }
            MissingRemoteRefPolicy::Create => {
                let remote_ref = self.client.create_order(account, order.payload()).await?;
                info!(
                    order_id = %order.id(),
                    remote_ref = %remote_ref,
                    "Unsynced order created remotely on update"
                );
                order.mark_synced(remote_ref);
                Ok(())
            }
            MissingRemoteRefPolicy::Reject => Err(SyncError::NotSynced {
                order_id: order.id().clone(),
            }),
        }
    }

    fn resolve_account(&self, account_id: &AccountId) -> Result<Account, SyncError> {
        self.accounts.find_account(account_id).map_err(|e| match e {
            StoreError::NotFound { .. } => SyncError::AccountNotFound {
                account_id: account_id.clone(),
            },
            other => SyncError::Store(other),
        })
    }
}
