//! JD Cloud Trade REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use tracing::{debug, info};
use url::Url;

use super::auth::TokenProvider;
use super::dto::{ErrorBody, OrderRequest, OrderResponse};
use crate::client::TradeClient;
use crate::config::NetworkConfig;
use crate::domain::{Account, OrderPayload, RemoteRef};
use crate::error::{ApiError, OAuthError, Result, SyncError};

/// HTTP client for the JD Cloud Trade order API.
///
/// Authenticates each call with a per-account bearer token. A 401 with
/// a cached token triggers exactly one transparent refresh-and-retry;
/// any further authentication failure surfaces as
/// [`SyncError::OAuth`]. Requests are bounded by the configured
/// timeout, and expiry maps to [`ApiError::Timeout`].
pub struct JdTradeClient {
    http: Client,
    base_url: String,
    tokens: TokenProvider,
    timeout_secs: u64,
}

impl JdTradeClient {
    /// Create a new client from the network configuration.
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(network.request_timeout_secs))
            .build()?;

        let token_url = Url::parse(&network.token_url)?;
        let tokens = TokenProvider::new(http.clone(), token_url);

        Ok(Self {
            http,
            base_url: network.api_url.trim_end_matches('/').to_string(),
            tokens,
            timeout_secs: network.request_timeout_secs,
        })
    }

    async fn send_order(
        &self,
        account: &Account,
        method: Method,
        url: String,
        body: &OrderRequest<'_>,
    ) -> std::result::Result<RemoteRef, SyncError> {
        let token = self.tokens.access_token(account).await?;
        let response = self.request(method.clone(), &url, &token, body).await?;

        // One transparent refresh-and-retry when a cached token has
        // been revoked server-side.
        let response = if response.status() == StatusCode::UNAUTHORIZED {
            debug!(account_id = %account.id(), "Cached token rejected, refreshing");
            let token =
                self.tokens
                    .refresh(account)
                    .await
                    .map_err(|e| OAuthError::RefreshFailed {
                        account_id: account.id().clone(),
                        source: Box::new(e),
                    })?;
            self.request(method, &url, &token, body).await?
        } else {
            response
        };

        self.decode(response).await
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: &OrderRequest<'_>,
    ) -> std::result::Result<Response, ApiError> {
        self.http
            .request(method, url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    async fn decode(&self, response: Response) -> std::result::Result<RemoteRef, SyncError> {
        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| SyncError::Api(self.transport_error(e)))?;

        if status.is_success() {
            let parsed: OrderResponse =
                serde_json::from_str(&raw).map_err(ApiError::MalformedResponse)?;
            return Ok(RemoteRef::new(parsed.order_id));
        }

        let body: ErrorBody = serde_json::from_str(&raw).unwrap_or_default();
        let message = body.message_or(&raw);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(OAuthError::Unauthorized(message).into())
            }
            StatusCode::UNPROCESSABLE_ENTITY => Err(ApiError::OrderRejected(message).into()),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                message,
            }
            .into()),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            ApiError::Transport(err)
        }
    }
}

#[async_trait]
impl TradeClient for JdTradeClient {
    async fn create_order(
        &self,
        account: &Account,
        payload: OrderPayload<'_>,
    ) -> std::result::Result<RemoteRef, SyncError> {
        let url = format!("{}/v1/orders", self.base_url);
        info!(order_id = %payload.order_id, url = %url, "Creating order remotely");

        let request = OrderRequest::from_payload(&payload);
        self.send_order(account, Method::POST, url, &request).await
    }

    async fn update_order(
        &self,
        account: &Account,
        remote_ref: &RemoteRef,
        payload: OrderPayload<'_>,
    ) -> std::result::Result<RemoteRef, SyncError> {
        let url = format!("{}/v1/orders/{}", self.base_url, remote_ref);
        info!(order_id = %payload.order_id, remote_ref = %remote_ref, "Updating order remotely");

        let request = OrderRequest::from_payload(&payload);
        self.send_order(account, Method::PUT, url, &request).await
    }

    fn platform_name(&self) -> &'static str {
        "jd-cloud-trade"
    }
}
