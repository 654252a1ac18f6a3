use tracing_subscriber::EnvFilter;

/// Initialize structured JSON logging on stderr.
///
/// `RUST_LOG` takes precedence. Otherwise quiet mode logs errors only and
/// verbose mode logs at info. Stdout is left alone for the stream sink.
pub fn init_logging(quiet: bool) {
    let default_level = if quiet { "error" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
