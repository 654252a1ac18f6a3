//! Tick and signal driven refresh, compose and publish.
//!
//! All mutable state (output slots, last published line, tick counter) is
//! owned by [`Scheduler`]. The run loop handles one trigger at a time, so a
//! tick cycle and a signal cycle never interleave: a signal that arrives
//! while a tick is refreshing waits in the channel until that cycle has
//! published.

use std::time::Duration;

use statusblocks_config::BlocksConfig;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::compositor::compose;
use crate::executor::Executor;
use crate::publisher::{Publisher, Sink};
use crate::registry::Registry;

/// Period of the production clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct Scheduler<S> {
    registry: Registry,
    executor: Executor,
    delimiter: String,
    outputs: Vec<String>,
    publisher: Publisher<S>,
    tick: u64,
    period: Duration,
}

impl<S: Sink> Scheduler<S> {
    pub fn new(config: &BlocksConfig, sink: S) -> Self {
        Self::with_parts(
            Registry::from_config(config),
            Executor::from_config(config),
            config.delimiter.clone(),
            sink,
        )
    }

    pub fn with_parts(
        registry: Registry,
        executor: Executor,
        delimiter: impl Into<String>,
        sink: S,
    ) -> Self {
        let outputs = vec![String::new(); registry.len()];
        Self {
            registry,
            executor,
            delimiter: delimiter.into(),
            outputs,
            publisher: Publisher::new(sink),
            tick: 0,
            period: TICK_PERIOD,
        }
    }

    /// Override the clock period. Production uses [`TICK_PERIOD`].
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current output slot per block, in registry order.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn publisher(&self) -> &Publisher<S> {
        &self.publisher
    }

    /// Number of periodic ticks handled so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Refresh every block regardless of interval, then publish.
    pub async fn startup(&mut self) -> bool {
        for (block, slot) in self.registry.iter().zip(self.outputs.iter_mut()) {
            self.executor.refresh(block, slot).await;
        }
        info!(
            event = "core.scheduler.startup_completed",
            blocks = self.registry.len(),
        );
        self.compose_and_publish()
    }

    /// Handle one periodic tick: refresh due blocks, then publish.
    pub async fn tick(&mut self) -> bool {
        let tick = self.tick;
        let mut refreshed = 0usize;
        for (block, slot) in self.registry.iter().zip(self.outputs.iter_mut()) {
            if block.is_due(tick) {
                self.executor.refresh(block, slot).await;
                refreshed += 1;
            }
        }
        self.tick += 1;

        debug!(event = "core.scheduler.tick_completed", tick = tick, refreshed = refreshed);
        self.compose_and_publish()
    }

    /// Handle one refresh event: refresh blocks with signal `id`, then publish.
    ///
    /// An id no block uses refreshes nothing; the publish is then a no-op.
    pub async fn signal(&mut self, id: u32) -> bool {
        let mut refreshed = 0usize;
        for (block, slot) in self.registry.iter().zip(self.outputs.iter_mut()) {
            if block.matches_signal(id) {
                self.executor.refresh(block, slot).await;
                refreshed += 1;
            }
        }

        debug!(event = "core.scheduler.signal_completed", signal = id, refreshed = refreshed);
        self.compose_and_publish()
    }

    fn compose_and_publish(&mut self) -> bool {
        let line = compose(&self.outputs, &self.delimiter);
        self.publisher.publish(line)
    }

    /// Run until `shutdown` is cancelled.
    ///
    /// Startup refresh first, then one cycle per clock tick or refresh event.
    /// Cancellation is only observed between cycles.
    pub async fn run(&mut self, mut events: UnboundedReceiver<u32>, shutdown: CancellationToken) {
        let mut clock = tokio::time::interval(self.period);
        // A stalled command delays the following ticks rather than bursting them.
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.startup().await;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!(event = "core.scheduler.shutdown_started", ticks = self.tick);
                    break;
                }
                Some(id) = events.recv() => {
                    self.signal(id).await;
                }
                _ = clock.tick() => {
                    self.tick().await;
                }
            }
        }
    }
}
