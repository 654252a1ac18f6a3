//! Configuration loading.
//!
//! Configuration is resolved in the following order:
//! 1. **Explicit path** - `--config <PATH>`; any read or parse failure is an error
//! 2. **User config** - `$XDG_CONFIG_HOME/statusblocks/config.toml`
//! 3. **Hardcoded defaults** - used when the user config is missing or broken
//!
//! The resolved configuration is always validated before it is returned.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::types::BlocksConfig;
use crate::validation::validate_config;

/// Location of the user config file, if a config directory can be resolved.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("statusblocks").join("config.toml"))
}

/// Load and validate the configuration.
///
/// With `explicit` set, that file must exist and parse. Without it, the user
/// config is tried and any problem with it falls back to the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<BlocksConfig, ConfigError> {
    let config = match explicit {
        Some(path) => load_config_file(path)?,
        None => load_user_config(),
    };
    validate_config(&config)?;

    tracing::debug!(
        event = "config.load.completed",
        blocks = config.blocks.len(),
        capacity = config.capacity,
    );
    Ok(config)
}

fn load_user_config() -> BlocksConfig {
    let Some(path) = config_path() else {
        tracing::warn!(
            event = "config.load.config_dir_missing",
            fallback = "defaults",
        );
        return BlocksConfig::default();
    };

    match load_config_file(&path) {
        Ok(config) => config,
        Err(ConfigError::IoError { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::debug!(
                event = "config.load.file_missing",
                path = %path.display(),
            );
            BlocksConfig::default()
        }
        Err(e) => {
            tracing::warn!(
                event = "config.load.failed",
                path = %path.display(),
                error = %e,
                fallback = "defaults",
            );
            BlocksConfig::default()
        }
    }
}

/// Read and parse one config file without validating it.
pub fn load_config_file(path: &Path) -> Result<BlocksConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
