//! OS signal bridge.
//!
//! Handlers never do block work themselves. Refresh signals become ids on
//! an mpsc channel and SIGINT/SIGTERM cancel a token; the scheduler loop
//! consumes both between cycles.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use nix::libc;
use tokio::signal::unix::{Signal, SignalKind, signal};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::BlocksError;
use crate::registry::Registry;

/// Signal number of refresh id `0`; block id `n` is `base + n`.
#[cfg(target_os = "linux")]
pub fn refresh_base() -> i32 {
    libc::SIGRTMIN()
}

/// Signal number of refresh id `0`; block id `n` is `base + n`.
#[cfg(not(target_os = "linux"))]
pub fn refresh_base() -> i32 {
    libc::SIGUSR1 - 1
}

/// OS signal number that refreshes blocks with `id`.
pub fn signal_number(id: u32) -> i32 {
    refresh_base() + id as i32
}

/// The real-time band. Every number in it gets a handler so none of them
/// keeps its default terminate action.
#[cfg(target_os = "linux")]
pub fn realtime_band() -> Option<RangeInclusive<i32>> {
    Some(libc::SIGRTMIN()..=libc::SIGRTMAX())
}

#[cfg(not(target_os = "linux"))]
pub fn realtime_band() -> Option<RangeInclusive<i32>> {
    None
}

/// Signal numbers to listen on: the whole real-time band plus every
/// configured block signal.
fn refresh_signals(ids: &BTreeSet<u32>) -> BTreeSet<i32> {
    let mut signals: BTreeSet<i32> = ids.iter().map(|&id| signal_number(id)).collect();
    if let Some(band) = realtime_band() {
        signals.extend(band);
    }
    signals
}

/// Forward refresh signals to `events` as `signum - base`.
///
/// Failing to install a configured block's signal is an error. Failing on an
/// unassigned band number only warns.
pub fn install_refresh_handlers(
    registry: &Registry,
    events: UnboundedSender<u32>,
) -> Result<(), BlocksError> {
    let base = refresh_base();
    let ids = registry.signal_ids();
    let configured: BTreeSet<i32> = ids.iter().map(|&id| signal_number(id)).collect();

    let mut installed = 0usize;
    for signum in refresh_signals(&ids) {
        let stream = match signal(SignalKind::from_raw(signum)) {
            Ok(stream) => stream,
            Err(source) if configured.contains(&signum) => {
                return Err(BlocksError::Signal { signum, source });
            }
            Err(e) => {
                warn!(
                    event = "core.signals.install_failed",
                    signum = signum,
                    error = %e,
                );
                continue;
            }
        };

        // Numbers below the base cannot name a block; they are only caught.
        let id = u32::try_from(signum - base).ok();
        tokio::spawn(forward_refresh(stream, signum, id, events.clone()));
        installed += 1;
    }

    info!(
        event = "core.signals.install_completed",
        base = base,
        handlers = installed,
        block_signals = ids.len(),
    );
    Ok(())
}

async fn forward_refresh(
    mut stream: Signal,
    signum: i32,
    id: Option<u32>,
    events: UnboundedSender<u32>,
) {
    while stream.recv().await.is_some() {
        debug!(event = "core.signals.refresh_received", signum = signum, id = ?id);
        let Some(id) = id else { continue };
        if events.send(id).is_err() {
            break;
        }
    }
}

/// Cancel `token` on SIGINT or SIGTERM.
///
/// Handlers are registered before returning so a registration failure is
/// reported at startup rather than lost in a background task.
pub fn install_shutdown_handler(token: CancellationToken) -> Result<(), BlocksError> {
    let mut sigint = signal(SignalKind::interrupt()).map_err(|source| BlocksError::Signal {
        signum: libc::SIGINT,
        source,
    })?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(|source| BlocksError::Signal {
        signum: libc::SIGTERM,
        source,
    })?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => {
                info!(event = "core.signals.signal_received", signal = "SIGINT");
            }
            _ = sigterm.recv() => {
                info!(event = "core.signals.signal_received", signal = "SIGTERM");
            }
        }
        token.cancel();
    });
    Ok(())
}
