//! Domain types: orders, accounts, identifiers, and sync state.

pub mod account;
pub mod error;
pub mod id;
pub mod order;

pub use account::{Account, OAuthCredentials};
pub use error::DomainError;
pub use id::{AccountId, OrderId, RemoteRef};
pub use order::{LineItem, Order, OrderPayload, OrderStatus, SyncState};
