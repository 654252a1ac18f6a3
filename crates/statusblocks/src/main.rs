use std::path::PathBuf;

use clap::ArgMatches;
use statusblocks_core::{BlocksError, init_logging};
use tracing::{error, info};

mod app;
mod sink;

fn main() {
    let matches = match app::parse_args(std::env::args_os()) {
        Ok(matches) => matches,
        Err(e) => e.exit(),
    };

    let verbose = matches.get_flag("verbose");
    init_logging(!verbose);
    info!(event = "cli.start_started");

    let exit_code = match run(&matches) {
        Ok(()) => {
            info!(event = "cli.start_completed");
            0
        }
        Err(e) => {
            error!(event = "cli.start_failed", error = %e, code = e.error_code());
            eprintln!("statusblocks: {}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(matches: &ArgMatches) -> Result<(), BlocksError> {
    let config_path = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let config = statusblocks_core::load_config(config_path)?;

    // Open the sink before the runtime starts so a missing display fails fast.
    let sink = sink::select_sink(matches.get_flag("print"))?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async { statusblocks_core::run_statusline(&config, sink).await })
}
