//! Per-account OAuth token acquisition and caching.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::dto::{TokenRequest, TokenResponse};
use crate::domain::{Account, AccountId};
use crate::error::OAuthError;

/// Tokens are considered expired this many seconds before the platform
/// says so, to keep in-flight requests from racing the deadline.
const EXPIRY_SKEW_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_SKEW_SECS) >= self.expires_at
    }
}

/// Fetches and caches access tokens per merchant account.
///
/// Tokens come from the platform's client-credentials endpoint and are
/// cached until shortly before expiry. [`TokenProvider::refresh`]
/// drops the cached token and fetches a fresh one; the client calls it
/// when the API answers 401 despite a cached token.
pub struct TokenProvider {
    http: Client,
    token_url: Url,
    cache: RwLock<HashMap<AccountId, CachedToken>>,
}

impl TokenProvider {
    pub fn new(http: Client, token_url: Url) -> Self {
        Self {
            http,
            token_url,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The current access token for the account, fetching one if the
    /// cache is empty or stale.
    pub async fn access_token(&self, account: &Account) -> Result<String, OAuthError> {
        if let Some(cached) = self.cache.read().get(account.id()) {
            if !cached.is_expired() {
                return Ok(cached.access_token.clone());
            }
        }
        self.refresh(account).await
    }

    /// Discard any cached token for the account and fetch a new one.
    pub async fn refresh(&self, account: &Account) -> Result<String, OAuthError> {
        debug!(account_id = %account.id(), "Requesting access token");

        let credentials = account.credentials();
        let request =
            TokenRequest::client_credentials(&credentials.client_id, &credentials.client_secret);

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&request)
            .send()
            .await
            .map_err(OAuthError::TokenRequest)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OAuthError::TokenRejected {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(OAuthError::TokenRequest)?;

        let cached = CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        };
        self.cache.write().insert(account.id().clone(), cached);

        info!(account_id = %account.id(), "Access token acquired");
        Ok(token.access_token)
    }

    #[cfg(test)]
    fn insert_for_test(&self, account_id: AccountId, access_token: &str, expires_in_secs: i64) {
        self.cache.write().insert(
            account_id,
            CachedToken {
                access_token: access_token.to_string(),
                expires_at: Utc::now() + Duration::seconds(expires_in_secs),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OAuthCredentials;

    fn provider() -> TokenProvider {
        TokenProvider::new(
            Client::new(),
            Url::parse("https://trade.example.com/oauth/token").unwrap(),
        )
    }

    fn account() -> Account {
        Account::new("A1", "Merchant", OAuthCredentials::new("id", "secret"))
    }

    #[tokio::test]
    async fn cached_token_is_reused_until_expiry() {
        let provider = provider();
        provider.insert_for_test(AccountId::new("A1"), "tok-1", 3600);

        let token = provider.access_token(&account()).await.unwrap();
        assert_eq!(token, "tok-1");
    }

    #[test]
    fn tokens_expire_ahead_of_the_deadline() {
        let fresh = CachedToken {
            access_token: "tok".into(),
            expires_at: Utc::now() + Duration::seconds(3600),
        };
        let stale = CachedToken {
            access_token: "tok".into(),
            expires_at: Utc::now() + Duration::seconds(EXPIRY_SKEW_SECS / 2),
        };
        assert!(!fresh.is_expired());
        assert!(stale.is_expired());
    }
}
