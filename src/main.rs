use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopsync::bootstrap;
use shopsync::config::Config;
use shopsync::scheduler::SyncScheduler;

// Initialize logging and tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,shopsync=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    info!("🚀 Starting Shopify order sync service");

    // Load configuration; missing credentials abort before any network call.
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    let state = bootstrap::initialize_sync_state(&config)?;

    if config.run_once {
        let report = state.engine.run().await?;
        info!("✓ One-shot sync completed: {:?}", report);
        return Ok(());
    }

    let scheduler = SyncScheduler::new(config.sync_interval(), state.engine.clone());
    let handle = scheduler.start();
    info!("⏰ Sync scheduled every {}s", config.sync_interval_secs);

    handle.await?;

    Ok(())
}
