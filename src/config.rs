use serde::Deserialize;
use std::time::Duration;

/// Default Admin API version used when SHOPIFY_API_VERSION is not set.
const DEFAULT_API_VERSION: &str = "2023-07";

/// Default interval between scheduled sync runs, in seconds.
const DEFAULT_SYNC_INTERVAL_SECS: u64 = 600;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub shop_name: String,
    pub access_token: String,
    pub api_version: String,
    /// Override for the API base URL; when unset the shop's
    /// `https://{shop}.myshopify.com` origin is used.
    pub api_base: Option<String>,
    pub data_dir: String,
    pub orders_table: String,
    pub refunds_table: String,
    pub sync_interval_secs: u64,
    pub run_once: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Ok(Self {
            shop_name: std::env::var("SHOPIFY_SHOP_NAME")
                .map_err(|_| config::ConfigError::NotFound("SHOPIFY_SHOP_NAME".to_string()))?,
            access_token: std::env::var("SHOPIFY_ACCESS_TOKEN")
                .map_err(|_| config::ConfigError::NotFound("SHOPIFY_ACCESS_TOKEN".to_string()))?,
            api_version: std::env::var("SHOPIFY_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            api_base: std::env::var("SHOPIFY_API_BASE").ok(),
            data_dir: std::env::var("SYNC_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            orders_table: std::env::var("ORDERS_TABLE").unwrap_or_else(|_| "Orders".to_string()),
            refunds_table: std::env::var("REFUNDS_TABLE")
                .unwrap_or_else(|_| "Refunds".to_string()),
            sync_interval_secs: std::env::var("SYNC_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SYNC_INTERVAL_SECS),
            run_once: std::env::var("RUN_ONCE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// Base URL requests are issued against.
    pub fn api_base_url(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| format!("https://{}.myshopify.com", self.shop_name))
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }
}
