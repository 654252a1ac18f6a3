#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Stable error code string for log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigParseError { .. } => "config_parse_error",
            ConfigError::InvalidConfiguration { .. } => "invalid_configuration",
            ConfigError::IoError { .. } => "config_io_error",
        }
    }
}
