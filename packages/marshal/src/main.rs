//! CLI entry point for qtibind.

use std::process::ExitCode;

use console::style;
use qtibind_marshal::{cli, QtiError};
use tracing_subscriber::EnvFilter;

/// Exit status for a rejected document or failed I/O.
const EXIT_FAILURE: u8 = 1;
/// Exit status for a version argument the engine cannot use.
const EXIT_BAD_VERSION: u8 = 2;

fn main() -> ExitCode {
    // Logs go to stderr so converted documents on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold().for_stderr());
            let code = match e {
                QtiError::UnknownVersion(_) | QtiError::InvalidVersion(_) => EXIT_BAD_VERSION,
                _ => EXIT_FAILURE,
            };
            ExitCode::from(code)
        }
    }
}
