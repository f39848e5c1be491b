//! Eventfund CLI
//!
//! Main entry point for the `eventfund` binary.

use std::process::ExitCode;

use clap::Parser;
use eventfund_common_config::{vars, Environment};
use eventfund_common_log::{LogConfig, LogLevel};
use tracing::debug;

mod cli;
mod commands;
mod error;
mod output;

use cli::Cli;

/// Application exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    NetworkError = 4,
    AccessDenied = 6,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let env = Environment::init();
    let cli = Cli::parse();

    init_logging(&cli);
    debug!(files = ?env.loaded(), "Environment loaded");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    match runtime.block_on(cli.execute()) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            debug!(error = ?e, "Command failed");
            eprintln!("error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
            e.exit_code().into()
        }
    }
}

/// `-v`/`-q` override the level from the environment; otherwise it is kept
/// if set, and the CLI defaults to warnings.
fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet || Environment::get(vars::EVENTFUND_LOG_LEVEL).is_none() {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }

    if let Err(e) = eventfund_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
