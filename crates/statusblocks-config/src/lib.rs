//! # statusblocks-config
//!
//! TOML configuration types, loading, and validation for statusblocks.
//!
//! Single source of truth for the block list, delimiter, shell and slot
//! capacity. Everything here is read once at startup and never mutated.

mod defaults;
mod loading;
mod validation;

pub mod errors;
pub mod types;

// Public API re-exports
pub use errors::ConfigError;
pub use loading::{config_path, load_config, load_config_file};
pub use types::{BlockConfig, BlocksConfig};
pub use validation::{MAX_SIGNAL_ID, validate_config};
