use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{AccountId, OrderId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Generic remote-call failures against the trade platform.
///
/// Everything that can go wrong on the wire that is *not* an
/// authentication problem: transport errors, timeouts, non-success
/// statuses, and responses the platform's own schema does not match.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("platform returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("order rejected: {0}")]
    OrderRejected(String),

    #[error("malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

/// Authentication and token failures from the trade platform.
///
/// Kept separate from [`ApiError`] so callers can branch into a
/// credential-refresh path instead of a generic retry.
#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("token request failed: {0}")]
    TokenRequest(#[source] reqwest::Error),

    #[error("token endpoint returned {status}: {message}")]
    TokenRejected { status: u16, message: String },

    #[error("access token for account {account_id} was rejected and refresh failed")]
    RefreshFailed {
        account_id: AccountId,
        #[source]
        source: Box<OAuthError>,
    },

    #[error("platform rejected credentials: {0}")]
    Unauthorized(String),
}

/// The closed set of failures a synchronization attempt can surface.
///
/// Callers match on the variant; there is no hierarchy to inspect.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("no account found for id {account_id}")]
    AccountNotFound { account_id: AccountId },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    OAuth(#[from] OAuthError),

    #[error("order {order_id} has no remote reference to update")]
    NotSynced { order_id: OrderId },

    #[error("account lookup failed: {0}")]
    Store(#[source] StoreError),
}

/// Persistence errors from the account and order stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no row found for id {id}")]
    NotFound { id: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Sync(SyncError::Api(err))
    }
}

impl From<OAuthError> for Error {
    fn from(err: OAuthError) -> Self {
        Error::Sync(SyncError::OAuth(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oauth_failure_is_distinct_from_api_failure() {
        let api: SyncError = ApiError::Status {
            status: 500,
            message: "internal".into(),
        }
        .into();
        let oauth: SyncError = OAuthError::Unauthorized("bad token".into()).into();

        assert!(matches!(api, SyncError::Api(_)));
        assert!(matches!(oauth, SyncError::OAuth(_)));
    }

    #[test]
    fn account_not_found_names_the_account() {
        let err = SyncError::AccountNotFound {
            account_id: AccountId::new("A2"),
        };
        assert_eq!(err.to_string(), "no account found for id A2");
    }
}
