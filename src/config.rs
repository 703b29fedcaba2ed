//! Configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with an environment
//! variable override for the merchant client secret
//! (`JD_CLIENT_SECRET`), which is never read from the file.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::{Account, OAuthCredentials};
use crate::error::{ConfigError, Result};
use crate::sync::MissingRemoteRefPolicy;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub merchant: MerchantConfig,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    /// Base URL of the order API.
    pub api_url: String,
    /// OAuth token endpoint.
    pub token_url: String,
    /// Bound on every remote call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Synchronization behavior knobs.
#[derive(Debug, Default, Deserialize)]
pub struct SyncConfig {
    /// What to do when an update arrives for an order that was never
    /// created remotely.
    #[serde(default)]
    pub missing_remote_ref: MissingRemoteRefPolicy,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DatabaseConfig {
    /// Sqlite database URL for the db-backed stores. Unset means the
    /// host wires its own stores.
    pub url: Option<String>,
}

/// Bootstrap merchant account, provisioned into the account store at
/// startup by hosts that manage a single merchant.
#[derive(Debug, Default, Deserialize)]
pub struct MerchantConfig {
    pub account_id: Option<String>,
    pub name: Option<String>,
    pub client_id: Option<String>,
    /// Loaded from the `JD_CLIENT_SECRET` environment variable, never
    /// from the config file.
    #[serde(skip)]
    pub client_secret: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        let _ = dotenvy::dotenv();
        config.merchant.client_secret = std::env::var("JD_CLIENT_SECRET").ok();

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.network.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if self.network.token_url.is_empty() {
            return Err(ConfigError::MissingField { field: "token_url" }.into());
        }
        if self.network.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        Ok(())
    }

    /// The bootstrap merchant account, if the config defines one.
    ///
    /// Requires `account_id`, `client_id`, and the `JD_CLIENT_SECRET`
    /// environment variable.
    pub fn merchant_account(&self) -> Option<Account> {
        let account_id = self.merchant.account_id.as_deref()?;
        let client_id = self.merchant.client_id.as_deref()?;
        let client_secret = self.merchant.client_secret.as_deref()?;
        let name = self.merchant.name.as_deref().unwrap_or(account_id);

        Some(Account::new(
            account_id,
            name,
            OAuthCredentials::new(client_id, client_secret),
        ))
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                api_url: "https://trade.jdcloud-api.com".into(),
                token_url: "https://trade.jdcloud-api.com/oauth/token".into(),
                request_timeout_secs: default_request_timeout_secs(),
            },
            sync: SyncConfig::default(),
            logging: LoggingConfig::default(),
            database: DatabaseConfig::default(),
            merchant: MerchantConfig::default(),
        }
    }
}
