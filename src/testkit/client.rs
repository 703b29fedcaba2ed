//! Scripted mock of the trade client.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::TradeClient;
use crate::domain::{Account, OrderPayload, RemoteRef};
use crate::error::{ApiError, OAuthError, SyncError};

/// What the mock should do with the next call.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Return this remote reference.
    Succeed(String),
    /// Fail with a generic API error (HTTP 500).
    FailApi(String),
    /// Fail with an authentication error.
    FailOAuth(String),
    /// Fail with a timeout.
    FailTimeout,
}

/// Which operation a recorded call hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallKind {
    Create,
    Update,
}

/// A call the mock observed.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub order_id: String,
    pub account_id: String,
    pub remote_ref: Option<String>,
}

/// Scripted [`TradeClient`] for tests.
///
/// Outcomes are consumed front-to-back; with an empty script, creates
/// succeed with `RMT-<order id>` and updates echo the reference they
/// were given, which makes repeated updates idempotent by default.
#[derive(Default)]
pub struct MockTradeClient {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTradeClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next unscripted call.
    pub fn push(&self, outcome: ScriptedOutcome) {
        self.script.lock().push_back(outcome);
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn run_script(&self, default_ref: String) -> Result<RemoteRef, SyncError> {
        match self.script.lock().pop_front() {
            None => Ok(RemoteRef::new(default_ref)),
            Some(ScriptedOutcome::Succeed(remote_ref)) => Ok(RemoteRef::new(remote_ref)),
            Some(ScriptedOutcome::FailApi(message)) => Err(ApiError::Status {
                status: 500,
                message,
            }
            .into()),
            Some(ScriptedOutcome::FailOAuth(message)) => {
                Err(OAuthError::Unauthorized(message).into())
            }
            Some(ScriptedOutcome::FailTimeout) => {
                Err(ApiError::Timeout { timeout_secs: 10 }.into())
            }
        }
    }
}

#[async_trait]
impl TradeClient for MockTradeClient {
    async fn create_order(
        &self,
        account: &Account,
        payload: OrderPayload<'_>,
    ) -> Result<RemoteRef, SyncError> {
        self.calls.lock().push(RecordedCall {
            kind: CallKind::Create,
            order_id: payload.order_id.to_string(),
            account_id: account.id().to_string(),
            remote_ref: None,
        });
        self.run_script(format!("RMT-{}", payload.order_id))
    }

    async fn update_order(
        &self,
        account: &Account,
        remote_ref: &RemoteRef,
        payload: OrderPayload<'_>,
    ) -> Result<RemoteRef, SyncError> {
        self.calls.lock().push(RecordedCall {
            kind: CallKind::Update,
            order_id: payload.order_id.to_string(),
            account_id: account.id().to_string(),
            remote_ref: Some(remote_ref.to_string()),
        });
        self.run_script(remote_ref.to_string())
    }

    fn platform_name(&self) -> &'static str {
        "mock"
    }
}
