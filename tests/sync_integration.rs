//! End-to-end sync tests against a mock Shopify Admin API.
//!
//! A wiremock server stands in for the shop; tables land in a tempdir.

use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopsync::config::Config;
use shopsync::shopify::client::ShopifyClient;
use shopsync::store::{CsvTableStore, TableStore};
use shopsync::sync::SyncEngine;

const ORDERS_PATH: &str = "/admin/api/2023-07/orders.json";
const TOKEN: &str = "shpat_integration_test";

fn test_config(base_url: &str, data_dir: &str) -> Config {
    Config {
        shop_name: "integration-shop".to_string(),
        access_token: TOKEN.to_string(),
        api_version: "2023-07".to_string(),
        api_base: Some(base_url.to_string()),
        data_dir: data_dir.to_string(),
        orders_table: "Orders".to_string(),
        refunds_table: "Refunds".to_string(),
        sync_interval_secs: 600,
        run_once: false,
    }
}

async fn mount_orders(server: &MockServer, orders: serde_json::Value, refunds: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(header("X-Shopify-Access-Token", TOKEN))
        .and(query_param("status", "any"))
        .and(query_param("financial_status", "refunded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "orders": refunds })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(header("X-Shopify-Access-Token", TOKEN))
        .and(query_param("status", "any"))
        .and(query_param_is_missing("financial_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "orders": orders })))
        .mount(server)
        .await;
}

fn build_engine(config: &Config) -> (SyncEngine, Arc<CsvTableStore>) {
    let client = Arc::new(ShopifyClient::new(config).unwrap());
    let store = Arc::new(CsvTableStore::new(&config.data_dir).unwrap());
    (SyncEngine::new(client, store.clone(), config), store)
}

async fn data_ids(store: &CsvTableStore, table: &str) -> Vec<String> {
    let rows = store.read_all(table).await.unwrap();
    rows.iter().skip(1).map(|r| r[0].clone()).collect()
}

fn order(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "order_number": 1000 + id,
        "email": "customer@example.com",
        "total_price": "42.50",
        "created_at": "2023-07-05T12:00:00-04:00"
    })
}

#[tokio::test]
async fn test_first_sync_creates_both_tables() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_orders(&server, json!([order(100)]), json!([])).await;

    let config = test_config(&server.uri(), dir.path().to_str().unwrap());
    let (engine, store) = build_engine(&config);

    let report = engine.run().await.unwrap();
    assert_eq!(report.orders_fetched, 1);
    assert_eq!(report.orders_appended, 1);

    assert_eq!(data_ids(&store, "Orders").await, vec!["100"]);
    let refunds = store.read_all("Refunds").await.unwrap();
    assert_eq!(refunds.len(), 1, "refund table should be header-only");
    assert_eq!(refunds[0][0], "Order ID");
}

#[tokio::test]
async fn test_resync_does_not_duplicate_orders() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_orders(&server, json!([order(100), order(101)]), json!([])).await;

    let config = test_config(&server.uri(), dir.path().to_str().unwrap());
    let (engine, store) = build_engine(&config);

    engine.run().await.unwrap();
    let report = engine.run().await.unwrap();
    assert_eq!(report.orders_appended, 0);

    assert_eq!(data_ids(&store, "Orders").await, vec!["100", "101"]);
}

#[tokio::test]
async fn test_refund_moves_order_between_tables() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_orders(&server, json!([order(100)]), json!([])).await;

    let config = test_config(&server.uri(), dir.path().to_str().unwrap());
    let (engine, store) = build_engine(&config);
    engine.run().await.unwrap();
    assert_eq!(data_ids(&store, "Orders").await, vec!["100"]);

    // Order 100 is refunded upstream.
    server.reset().await;
    mount_orders(&server, json!([order(100)]), json!([order(100)])).await;

    let report = engine.run().await.unwrap();
    assert_eq!(report.orders_purged, 1);
    assert_eq!(report.refunds_appended, 1);

    assert!(data_ids(&store, "Orders").await.is_empty());
    assert_eq!(data_ids(&store, "Refunds").await, vec!["100"]);
}

#[tokio::test]
async fn test_server_error_aborts_before_table_mutation() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path().to_str().unwrap());
    let (engine, store) = build_engine(&config);

    assert!(engine.run().await.is_err());
    assert!(store.read_all("Orders").await.unwrap().is_empty());
    assert!(store.read_all("Refunds").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_json_body_aborts_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path().to_str().unwrap());
    let (engine, store) = build_engine(&config);

    assert!(engine.run().await.is_err());
    assert!(store.read_all("Orders").await.unwrap().is_empty());
}
