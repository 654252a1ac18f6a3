//! statusblocks-core: block scheduling engine for a status-line aggregator
//!
//! Runs a fixed set of shell commands ("blocks") on per-block intervals,
//! joins their first output lines into one status line and publishes it
//! to a sink whenever it changes. Real-time signals trigger out-of-band
//! refreshes of individual blocks.
//!
//! # Main Entry Points
//!
//! - [`run_statusline`] - Install signal handlers and run the loop until SIGINT/SIGTERM
//! - [`scheduler`] - Tick/signal driven refresh, compose and publish
//! - [`executor`] - Bounded capture of one block's command output
//! - [`publisher`] - Change suppression and the stdout/title sinks

pub mod compositor;
pub mod errors;
pub mod executor;
pub mod logging;
pub mod publisher;
pub mod registry;
pub mod runner;
pub mod scheduler;
pub mod signals;

pub use compositor::compose;
pub use errors::BlocksError;
pub use executor::Executor;
pub use publisher::{Publisher, Sink, StreamSink};
pub use registry::{BlockDescriptor, Registry};
pub use runner::run_statusline;
pub use scheduler::Scheduler;

#[cfg(feature = "x11")]
pub use publisher::TitleSink;

// Re-export config types so the binary only needs one dependency for them
pub use statusblocks_config::{BlockConfig, BlocksConfig, ConfigError, load_config};

// Re-export logging initialization
pub use logging::init_logging;
