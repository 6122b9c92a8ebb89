use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::shopify::client::ShopifyClient;
use crate::store::CsvTableStore;
use crate::sync::SyncEngine;

/// Wired application components.
pub struct SyncState {
    pub engine: Arc<SyncEngine>,
}

pub fn initialize_sync_state(config: &Config) -> AppResult<SyncState> {
    info!("Initializing sync components ...");

    let client = Arc::new(ShopifyClient::new(config)?);
    info!("✅ Shopify client initialized for shop: {}", config.shop_name);

    let store = Arc::new(CsvTableStore::new(&config.data_dir)?);
    info!("✅ Table store initialized at: {}", config.data_dir);

    let engine = Arc::new(SyncEngine::new(client, store, config));

    Ok(SyncState { engine })
}
