use statusblocks_config::BlocksConfig;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::errors::BlocksError;
use crate::publisher::Sink;
use crate::scheduler::Scheduler;
use crate::signals;

/// Run the status line until SIGINT or SIGTERM.
///
/// This is the main entrypoint called by the `statusblocks` binary. It:
/// 1. Installs the SIGINT/SIGTERM handler
/// 2. Installs refresh handlers for the real-time band
/// 3. Refreshes every block and publishes once
/// 4. Loops on the 1-second clock and refresh events until shutdown
///
/// Must be called inside a tokio runtime. The sink is opened by the caller
/// so display failures surface before any signal handler is installed.
pub async fn run_statusline<S: Sink>(config: &BlocksConfig, sink: S) -> Result<(), BlocksError> {
    let shutdown = CancellationToken::new();
    let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();

    let mut scheduler = Scheduler::new(config, sink);
    signals::install_shutdown_handler(shutdown.clone())?;
    signals::install_refresh_handlers(scheduler.registry(), events_tx)?;

    info!(
        event = "core.runner.started",
        pid = std::process::id(),
        blocks = scheduler.registry().len(),
        sink = scheduler.publisher().sink().name(),
    );

    scheduler.run(events_rx, shutdown).await;

    info!(
        event = "core.runner.shutdown_completed",
        ticks = scheduler.tick_count(),
    );
    Ok(())
}
