//! Configuration validation logic.
//!
//! Runs once after loading so a bad block list is rejected before any
//! command is executed or any signal handler installed.

use crate::errors::ConfigError;
use crate::types::BlocksConfig;

/// Largest usable signal id: the width of the Linux real-time band
/// (`SIGRTMAX - SIGRTMIN` with glibc).
pub const MAX_SIGNAL_ID: u32 = 30;

/// Validate a BlocksConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - At least one block must be configured
/// - `capacity` must be > 0
/// - `shell` must not be empty
/// - Every block's `signal` must be `0` or in `1..=MAX_SIGNAL_ID`
pub fn validate_config(config: &BlocksConfig) -> Result<(), ConfigError> {
    if config.blocks.is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "at least one [[block]] must be configured".to_string(),
        });
    }

    if config.capacity == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "capacity must be > 0".to_string(),
        });
    }

    if config.shell.trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "shell must not be empty".to_string(),
        });
    }

    for (index, block) in config.blocks.iter().enumerate() {
        if block.signal > MAX_SIGNAL_ID {
            return Err(ConfigError::InvalidConfiguration {
                message: format!(
                    "block {} ('{}'): signal {} is out of range (1..={})",
                    index, block.command, block.signal, MAX_SIGNAL_ID
                ),
            });
        }
    }

    Ok(())
}
