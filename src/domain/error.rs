//! Domain validation errors.
//!
//! Returned by `try_new` constructors that validate inputs before an
//! order is allowed anywhere near the wire.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Order amounts must be strictly positive.
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The invalid amount that was provided.
        amount: rust_decimal::Decimal,
    },

    /// An order must name the account it belongs to.
    #[error("order has an empty account id")]
    EmptyAccountId,

    /// An order must carry at least one line item.
    #[error("order has no line items")]
    EmptyItems,
}
