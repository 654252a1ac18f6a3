use std::io;

use statusblocks_config::ConfigError;

/// All error types for the statusblocks-core crate.
///
/// Per-block failures (command launch, truncation) never surface here; they
/// are contained in the executor. These are startup and sink failures.
#[derive(Debug, thiserror::Error)]
pub enum BlocksError {
    #[error("failed to open display: {0}")]
    DisplayUnavailable(String),

    #[error("sink write failed: {0}")]
    SinkWrite(String),

    #[error("failed to install handler for signal {signum}: {source}")]
    Signal {
        signum: i32,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl BlocksError {
    /// Stable error code string for log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            BlocksError::DisplayUnavailable(_) => "display_unavailable",
            BlocksError::SinkWrite(_) => "sink_write_failed",
            BlocksError::Signal { .. } => "signal_handler_failed",
            BlocksError::Io(_) => "io_error",
            BlocksError::Config(_) => "config_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlocksError::DisplayUnavailable(":0".to_string());
        assert_eq!(err.to_string(), "failed to open display: :0");
        assert_eq!(err.error_code(), "display_unavailable");
    }

    #[test]
    fn test_error_codes() {
        let cases: Vec<(BlocksError, &str)> = vec![
            (
                BlocksError::DisplayUnavailable("x".to_string()),
                "display_unavailable",
            ),
            (
                BlocksError::SinkWrite("closed".to_string()),
                "sink_write_failed",
            ),
            (
                BlocksError::Signal {
                    signum: 40,
                    source: io::Error::other("forbidden"),
                },
                "signal_handler_failed",
            ),
            (
                BlocksError::Config(ConfigError::InvalidConfiguration {
                    message: "capacity must be > 0".to_string(),
                }),
                "config_error",
            ),
        ];

        for (err, expected_code) in cases {
            assert_eq!(err.error_code(), expected_code);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: BlocksError = io_err.into();
        assert_eq!(err.error_code(), "io_error");
    }

    #[test]
    fn test_signal_error_mentions_number() {
        let err = BlocksError::Signal {
            signum: 35,
            source: io::Error::other("nope"),
        };
        assert!(err.to_string().contains("signal 35"));
    }
}
