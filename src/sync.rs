use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::reconcile::{orders::merge_orders, refunds::merge_refunds, row_id, TABLE_COLUMNS};
use crate::shopify::client::OrderSource;
use crate::store::{Row, TableStore};

/// Summary of one completed sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub orders_fetched: usize,
    pub refunds_fetched: usize,
    pub refunds_appended: usize,
    pub orders_purged: usize,
    pub orders_appended: usize,
}

/// Drives one fetch-reconcile-rewrite cycle over both tables.
pub struct SyncEngine {
    source: Arc<dyn OrderSource>,
    store: Arc<dyn TableStore>,
    orders_table: String,
    refunds_table: String,
    // Guards against overlapping runs when a scheduled tick races a manual
    // invocation. Contention is reported, not queued.
    run_guard: Mutex<()>,
}

impl SyncEngine {
    pub fn new(source: Arc<dyn OrderSource>, store: Arc<dyn TableStore>, config: &Config) -> Self {
        Self {
            source,
            store,
            orders_table: config.orders_table.clone(),
            refunds_table: config.refunds_table.clone(),
            run_guard: Mutex::new(()),
        }
    }

    /// Execute one sync run.
    ///
    /// Both fetches happen before any table mutation, so a transport failure
    /// leaves both tables untouched. The refund table is rewritten before the
    /// order table, matching the order the upstream data is consumed in.
    pub async fn run(&self) -> AppResult<SyncReport> {
        let _guard = self
            .run_guard
            .try_lock()
            .map_err(|_| AppError::SyncInProgress)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("🔄 Starting sync run {}", run_id);

        let orders = self.source.fetch_orders().await?;
        let refunds = self.source.fetch_refunded_orders().await?;
        info!(
            "Fetched {} orders, {} refunded orders",
            orders.len(),
            refunds.len()
        );

        // Refund pass: append-only merge into the refund table.
        let refund_rows = self.read_data_rows(&self.refunds_table).await?;
        let persisted_refund_ids: HashSet<String> =
            refund_rows.iter().map(|r| row_id(r).to_string()).collect();
        let (refund_rows, refunds_appended) = merge_refunds(refund_rows, &refunds);
        self.rewrite(&self.refunds_table, &refund_rows).await?;

        // Order pass. The exclusion set is the union of the live refund fetch
        // and the identifiers already persisted in the refund table, so an
        // order refunded in an earlier run stays out even once it drops off
        // the live refund window.
        let mut refunded_ids: HashSet<String> = refunds.iter().map(|r| r.id.clone()).collect();
        refunded_ids.extend(persisted_refund_ids);

        let order_rows = self.read_data_rows(&self.orders_table).await?;
        let merge = merge_orders(order_rows, &orders, &refunded_ids);
        self.rewrite(&self.orders_table, &merge.rows).await?;

        let report = SyncReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            orders_fetched: orders.len(),
            refunds_fetched: refunds.len(),
            refunds_appended,
            orders_purged: merge.purged,
            orders_appended: merge.appended,
        };
        info!(
            "✓ Sync run {} completed: +{} refunds, +{} orders, -{} refunded orders",
            run_id, report.refunds_appended, report.orders_appended, report.orders_purged
        );
        Ok(report)
    }

    /// Data rows of a table, writing the header first if the table is empty.
    async fn read_data_rows(&self, table: &str) -> AppResult<Vec<Row>> {
        let mut rows = self.store.read_all(table).await?;
        if rows.is_empty() {
            self.store.append_header(table, TABLE_COLUMNS).await?;
            return Ok(Vec::new());
        }
        rows.remove(0);
        Ok(rows)
    }

    /// Full rewrite: clear, header, then the data block at row 1.
    async fn rewrite(&self, table: &str, rows: &[Row]) -> AppResult<()> {
        self.store.clear(table).await?;
        self.store.append_header(table, TABLE_COLUMNS).await?;
        self.store.write_block(table, 1, rows).await
    }
}
