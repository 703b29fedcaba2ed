//! Integration tests for the order synchronizer.

use std::sync::Arc;

use jd_trade_sync::adapter::store::MemoryAccountStore;
use jd_trade_sync::domain::{Order, RemoteRef};
use jd_trade_sync::error::SyncError;
use jd_trade_sync::sync::{MissingRemoteRefPolicy, OrderSynchronizer};
use jd_trade_sync::testkit::client::{CallKind, MockTradeClient, ScriptedOutcome};
use jd_trade_sync::testkit::fixtures;
use rust_decimal_macros::dec;

/// Synchronizer over a mock client and a store holding the given
/// account ids.
fn harness(account_ids: &[&str]) -> (Arc<MockTradeClient>, OrderSynchronizer) {
    let client = Arc::new(MockTradeClient::new());
    let accounts = Arc::new(MemoryAccountStore::new());
    for id in account_ids {
        accounts.insert(fixtures::account(id));
    }
    let synchronizer = OrderSynchronizer::new(client.clone(), accounts);
    (client, synchronizer)
}

#[tokio::test]
async fn create_assigns_the_remote_reference_returned_by_the_client() {
    let (client, synchronizer) = harness(&["A1"]);
    client.push(ScriptedOutcome::Succeed("RMT-777".into()));

    let mut order = fixtures::order("1", "A1", dec!(100));
    synchronizer.before_create(&mut order).await.unwrap();

    assert_eq!(order.remote_ref().map(RemoteRef::as_str), Some("RMT-777"));
}

#[tokio::test]
async fn missing_account_fails_create_and_leaves_the_order_untouched() {
    let (client, synchronizer) = harness(&["A1"]);

    let mut order = fixtures::order("2", "A2", dec!(50));
    let before = order.clone();

    let err = synchronizer.before_create(&mut order).await.unwrap_err();

    assert!(matches!(err, SyncError::AccountNotFound { .. }));
    assert_eq!(err.to_string(), "no account found for id A2");
    assert_eq!(order, before);
    // The client must never be reached without a resolved account.
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn missing_account_fails_update_too() {
    let (_, synchronizer) = harness(&[]);

    let mut order = fixtures::order("2", "A2", dec!(50));
    let err = synchronizer.before_update(&mut order).await.unwrap_err();

    assert!(matches!(err, SyncError::AccountNotFound { .. }));
}

#[tokio::test]
async fn api_failure_surfaces_and_leaves_the_reference_unchanged() {
    let (client, synchronizer) = harness(&["A1"]);
    client.push(ScriptedOutcome::FailApi("connection reset".into()));

    let mut order = fixtures::order("1", "A1", dec!(100));
    let before = order.clone();

    let err = synchronizer.before_create(&mut order).await.unwrap_err();

    assert!(matches!(err, SyncError::Api(_)));
    assert_eq!(order, before);
}

#[tokio::test]
async fn api_failure_on_update_keeps_the_previous_reference() {
    let (client, synchronizer) = harness(&["A1"]);
    let mut order = fixtures::order("1", "A1", dec!(100));
    synchronizer.before_create(&mut order).await.unwrap();
    let synced_ref = order.remote_ref().cloned().unwrap();

    client.push(ScriptedOutcome::FailApi("boom".into()));
    order.set_amount(dec!(120)).unwrap();

    let err = synchronizer.before_update(&mut order).await.unwrap_err();

    assert!(matches!(err, SyncError::Api(_)));
    assert_eq!(order.remote_ref(), Some(&synced_ref));
}

#[tokio::test]
async fn oauth_failure_is_distinct_from_api_failure() {
    let (client, synchronizer) = harness(&["A1"]);
    client.push(ScriptedOutcome::FailOAuth("token revoked".into()));

    let mut order = fixtures::order("1", "A1", dec!(100));
    let err = synchronizer.before_create(&mut order).await.unwrap_err();

    assert!(matches!(err, SyncError::OAuth(_)));
    assert!(!matches!(err, SyncError::Api(_)));
    assert_eq!(order.remote_ref(), None);
}

#[tokio::test]
async fn timeout_is_an_api_failure_not_an_oauth_one() {
    let (client, synchronizer) = harness(&["A1"]);
    client.push(ScriptedOutcome::FailTimeout);

    let mut order = fixtures::order("1", "A1", dec!(100));
    let err = synchronizer.before_create(&mut order).await.unwrap_err();

    assert!(matches!(err, SyncError::Api(_)));
}

#[tokio::test]
async fn repeated_updates_with_unchanged_state_yield_the_same_reference() {
    let (client, synchronizer) = harness(&["A1"]);

    let mut order = fixtures::order("1", "A1", dec!(100));
    synchronizer.before_create(&mut order).await.unwrap();
    let first_ref = order.remote_ref().cloned().unwrap();

    synchronizer.before_update(&mut order).await.unwrap();
    synchronizer.before_update(&mut order).await.unwrap();

    assert_eq!(order.remote_ref(), Some(&first_ref));

    // Both updates targeted the existing remote order; no duplicate
    // create ever went out.
    let calls = client.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].kind, CallKind::Create);
    assert_eq!(calls[1].kind, CallKind::Update);
    assert_eq!(calls[2].kind, CallKind::Update);
    assert_eq!(calls[1].remote_ref.as_deref(), Some(first_ref.as_str()));
    assert_eq!(calls[2].remote_ref.as_deref(), Some(first_ref.as_str()));
}

#[tokio::test]
async fn update_without_reference_skips_by_default() {
    let (client, synchronizer) = harness(&["A1"]);

    let mut order = fixtures::order("1", "A1", dec!(100));
    synchronizer.before_update(&mut order).await.unwrap();

    assert_eq!(order.remote_ref(), None);
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn update_without_reference_can_create_implicitly() {
    let client = Arc::new(MockTradeClient::new());
    let accounts = Arc::new(MemoryAccountStore::new());
    accounts.insert(fixtures::account("A1"));
    let synchronizer = OrderSynchronizer::new(client.clone(), accounts)
        .with_policy(MissingRemoteRefPolicy::Create);

    let mut order = fixtures::order("1", "A1", dec!(100));
    synchronizer.before_update(&mut order).await.unwrap();

    assert_eq!(order.remote_ref().map(RemoteRef::as_str), Some("RMT-1"));
    assert_eq!(client.calls()[0].kind, CallKind::Create);
}

#[tokio::test]
async fn update_without_reference_can_be_rejected() {
    let client = Arc::new(MockTradeClient::new());
    let accounts = Arc::new(MemoryAccountStore::new());
    accounts.insert(fixtures::account("A1"));
    let synchronizer =
        OrderSynchronizer::new(client, accounts).with_policy(MissingRemoteRefPolicy::Reject);

    let mut order = fixtures::order("1", "A1", dec!(100));
    let err = synchronizer.before_update(&mut order).await.unwrap_err();

    assert!(matches!(err, SyncError::NotSynced { .. }));
    assert_eq!(order.remote_ref(), None);
}

#[tokio::test]
async fn scripted_scenario_a1_succeeds_and_a2_fails() {
    let (client, synchronizer) = harness(&["A1"]);
    client.push(ScriptedOutcome::Succeed("RMT-1".into()));

    let mut order = Order::try_new(
        "1",
        "A1",
        dec!(100),
        vec![jd_trade_sync::domain::LineItem::new("SKU-1", 1, dec!(100))],
    )
    .unwrap();
    synchronizer.before_create(&mut order).await.unwrap();
    assert_eq!(order.remote_ref().map(RemoteRef::as_str), Some("RMT-1"));

    let mut other = fixtures::order("2", "A2", dec!(10));
    let err = synchronizer.before_create(&mut other).await.unwrap_err();
    assert!(matches!(err, SyncError::AccountNotFound { .. }));
}
