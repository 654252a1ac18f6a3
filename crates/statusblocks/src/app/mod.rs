
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("statusblocks")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Modular status line: runs block commands and publishes one line when it changes")
        .long_about("statusblocks runs a fixed list of shell commands on per-block intervals, joins their first output lines with a delimiter, and sets the result as the X root window name (read by dwm) or prints it to stdout. Send SIGRTMIN+N to refresh the blocks configured with signal N immediately.")
        .arg(
            Arg::new("print")
                .short('p')
                .long("print")
                .help("Print the status line to stdout instead of setting the root window name")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Read blocks from this config file instead of the user config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue),
        )
        // Every argument other than the ones above is ignored, -h and -V included.
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
}

/// Parse the command line, ignoring anything that is not a known flag.
pub fn parse_args<I, T>(args: I) -> Result<ArgMatches, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    build_cli().try_get_matches_from(known_args(args))
}

/// Keep the program name, the known flags and `--config`'s value; drop the rest.
///
/// Unknown arguments can sit anywhere, so they are removed up front rather
/// than left for clap, which stops at the first one it cannot match.
pub fn known_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else { continue };
        match text {
            "-p" | "--print" | "-v" | "--verbose" => kept.push(arg),
            "-c" | "--config" => {
                // A following flag is not a value; the dangling `-c` is dropped.
                if let Some(value) =
                    args.next_if(|value| !value.to_str().is_some_and(|v| v.starts_with('-')))
                {
                    kept.push(arg);
                    kept.push(value);
                }
            }
            _ if text.starts_with("--config=") && text.len() > "--config=".len() => {
                kept.push(arg)
            }
            // Attached value: `-c/path/to/config.toml`
            _ if text.starts_with("-c") && text.len() > 2 => kept.push(arg),
            // Clustered short flags: `-pv`
            _ if text.len() > 2
                && text.starts_with('-')
                && text[1..].chars().all(|c| c == 'p' || c == 'v') =>
            {
                kept.push(arg)
            }
            _ => {}
        }
    }
    kept
}
