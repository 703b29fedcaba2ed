//! Trade client trait definition.

use async_trait::async_trait;

use crate::domain::{Account, OrderPayload, RemoteRef};
use crate::error::SyncError;

/// Client for creating and updating orders on a remote trade platform.
///
/// Both operations authenticate with the given account's credentials and
/// fail with [`SyncError::Api`] on remote-call failures or
/// [`SyncError::OAuth`] on authentication failures. Implementations own
/// any retry policy; callers never retry.
#[async_trait]
pub trait TradeClient: Send + Sync {
    /// Create the order on the platform, returning its remote reference.
    async fn create_order(
        &self,
        account: &Account,
        payload: OrderPayload<'_>,
    ) -> Result<RemoteRef, SyncError>;

    /// Update a previously created order, targeted by its remote
    /// reference. Returns the (possibly unchanged) reference.
    async fn update_order(
        &self,
        account: &Account,
        remote_ref: &RemoteRef,
        payload: OrderPayload<'_>,
    ) -> Result<RemoteRef, SyncError>;

    /// Get the platform name for logging/debugging.
    fn platform_name(&self) -> &'static str;
}
