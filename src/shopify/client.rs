use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::AppResult;
use crate::shopify::models::{OrderRecord, OrdersResponse};

/// Header carrying the Admin API credential.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Source of order and refund records.
///
/// `ShopifyClient` is the production implementation; the sync engine only
/// depends on this trait so tests can drive it with canned data.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetch all orders, regardless of status.
    async fn fetch_orders(&self) -> AppResult<Vec<OrderRecord>>;

    /// Fetch orders whose financial status is refunded.
    async fn fetch_refunded_orders(&self) -> AppResult<Vec<OrderRecord>>;
}

/// Authenticated client for the Shopify Admin REST API.
pub struct ShopifyClient {
    client: Client,
    base_url: String,
    api_version: String,
    access_token: String,
}

impl ShopifyClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url(),
            api_version: config.api_version.clone(),
            access_token: config.access_token.clone(),
        })
    }

    async fn fetch(&self, query: &str) -> AppResult<Vec<OrderRecord>> {
        let url = format!(
            "{}/admin/api/{}/orders.json?{}",
            self.base_url, self.api_version, query
        );
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .send()
            .await?
            .error_for_status()?;

        let body: OrdersResponse = response.json().await?;
        Ok(body.orders)
    }
}

#[async_trait]
impl OrderSource for ShopifyClient {
    async fn fetch_orders(&self) -> AppResult<Vec<OrderRecord>> {
        self.fetch("status=any").await
    }

    async fn fetch_refunded_orders(&self) -> AppResult<Vec<OrderRecord>> {
        self.fetch("status=any&financial_status=refunded").await
    }
}
