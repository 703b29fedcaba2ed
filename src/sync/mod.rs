//! Order synchronization with the trade platform.
//!
//! The persistence layer calls [`OrderSynchronizer`] directly before
//! committing an order, in place of framework-dispatched lifecycle
//! events.

mod synchronizer;

pub use synchronizer::{MissingRemoteRefPolicy, OrderSynchronizer};
