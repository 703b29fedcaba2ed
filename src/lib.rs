//! jd-trade-sync - Order synchronization with the JD Cloud Trade platform.
//!
//! This crate mirrors local trade orders onto a remote trading platform:
//! before an order is committed locally, its state is pushed to the
//! platform and the returned remote reference is attached to it. A
//! failed remote call aborts the local operation, so no partially
//! synced state is ever persisted.
//!
//! # Architecture
//!
//! Collaborators are injected through ports (traits), never looked up
//! at runtime:
//!
//! - **`client`** - The [`TradeClient`](client::TradeClient) port for
//!   creating and updating orders remotely
//! - **`store`** - The [`AccountStore`](store::AccountStore) port for
//!   resolving merchant accounts
//! - **`sync`** - [`OrderSynchronizer`](sync::OrderSynchronizer), the
//!   pre-commit hook wiring the two together
//! - **`adapter`** - Concrete implementations: the JD Cloud Trade REST
//!   client with OAuth token handling, in-memory and sqlite stores
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Orders, accounts, identifiers, sync state
//! - [`error`] - Error types for the crate
//! - [`client`] - Trait definition for platform clients
//! - [`store`] - Trait definition for account lookup
//! - [`sync`] - The order synchronizer and its policies
//! - [`adapter`] - Port implementations
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use jd_trade_sync::adapter::jd::JdTradeClient;
//! use jd_trade_sync::adapter::store::MemoryAccountStore;
//! use jd_trade_sync::config::Config;
//! use jd_trade_sync::sync::OrderSynchronizer;
//!
//! # fn main() -> jd_trade_sync::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let client = Arc::new(JdTradeClient::new(&config.network)?);
//! let accounts = Arc::new(MemoryAccountStore::new());
//!
//! let synchronizer = OrderSynchronizer::new(client, accounts)
//!     .with_policy(config.sync.missing_remote_ref);
//! # let _ = synchronizer;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod store;
pub mod sync;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
