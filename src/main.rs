//! fortudo CLI entry point

use anyhow::{Context, Result};
use clap::Parser;

use fortudo::cli::{commands, Cli};
use fortudo::domain::ports::{Clock, SnapshotStore, SystemClock};
use fortudo::domain::time_math::extract_date;
use fortudo::infrastructure::config::ConfigLoader;
use fortudo::infrastructure::logging::{LogConfig, LoggerImpl, TracingObserver};
use fortudo::infrastructure::persistence::JsonSnapshotStore;
use fortudo::{SchedulerOps, TaskStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load().context("failed to load configuration")?;
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging)).context("failed to initialize logger")?;

    let snapshot_store = JsonSnapshotStore::new(&config.data_file);
    let tasks = snapshot_store.load_all().await.context("failed to load task snapshot")?;

    let mut store = TaskStore::seed(tasks);
    store.register_observer(Box::new(TracingObserver));

    let clock = SystemClock;
    let now = clock.now();
    let today = extract_date(now);

    let mut ops = SchedulerOps::new(store, clock);

    commands::dispatch(cli.command, &mut ops, &today, now, cli.json)?;

    snapshot_store
        .save_all(ops.store().get_all())
        .await
        .context("failed to save task snapshot")?;

    Ok(())
}
