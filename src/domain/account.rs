//! Merchant account holding the credentials for the trade platform.

use serde::{Deserialize, Serialize};

use super::AccountId;

/// OAuth client credentials issued to a merchant by the trade platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl OAuthCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// A merchant account on the trade platform.
///
/// Immutable from the synchronizer's perspective: it is looked up per
/// order and only read. Access tokens are not stored here; the client
/// adapter fetches and caches them per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    merchant_name: String,
    credentials: OAuthCredentials,
}

impl Account {
    pub fn new(
        id: impl Into<AccountId>,
        merchant_name: impl Into<String>,
        credentials: OAuthCredentials,
    ) -> Self {
        Self {
            id: id.into(),
            merchant_name: merchant_name.into(),
            credentials,
        }
    }

    #[must_use]
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    #[must_use]
    pub fn merchant_name(&self) -> &str {
        &self.merchant_name
    }

    #[must_use]
    pub fn credentials(&self) -> &OAuthCredentials {
        &self.credentials
    }
}
