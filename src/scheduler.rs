use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::sync::SyncEngine;

/// Recurring timer that drives the sync engine.
///
/// The first cycle runs at startup, then one per interval. Ticks that fall
/// due while a run is still in flight are skipped, never queued.
pub struct SyncScheduler {
    period: Duration,
    engine: Arc<SyncEngine>,
}

impl SyncScheduler {
    pub fn new(period: Duration, engine: Arc<SyncEngine>) -> Self {
        Self { period, engine }
    }

    /// Start the scheduler (runs in background).
    pub fn start(&self) -> JoinHandle<()> {
        let period = self.period;
        let engine = self.engine.clone();

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                info!("⏰ Sync tick");
                match engine.run().await {
                    Ok(report) => {
                        info!(
                            "✓ Scheduled sync {} finished in {}ms",
                            report.run_id,
                            (report.finished_at - report.started_at).num_milliseconds()
                        );
                    }
                    Err(AppError::SyncInProgress) => {
                        warn!("⚠ Previous sync still running, skipping this tick");
                    }
                    Err(e) => {
                        // The next tick is the only retry path.
                        error!("❌ Sync run failed: {:?}", e);
                    }
                }
            }
        })
    }
}
