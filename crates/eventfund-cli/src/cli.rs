//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use eventfund_auth::{AccessGuard, AuthApi, FileStore, HttpAuthApi, MockAuthApi, TokenVerifier};
use eventfund_common_config::{ConfigLoader, EventfundConfig};
use eventfund_common_log::spans::Timer;
use tracing::debug;

use crate::commands::{
    AuthorizeCommand, CheckCommand, LoginCommand, LogoutCommand, RoutesCommand, WhoamiCommand,
};
use crate::error::CliError;

/// Eventfund - event funding platform client
///
/// Log in, inspect the stored session and check which dashboard routes
/// it may enter.
#[derive(Debug, Parser)]
#[command(
    name = "eventfund",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "EVENTFUND_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login(LoginCommand),

    /// Forget the stored session
    Logout(LogoutCommand),

    /// Show the stored session
    Whoami(WhoamiCommand),

    /// Check whether the session may open a route
    Check(CheckCommand),

    /// Check the session against an explicit set of roles
    Authorize(AuthorizeCommand),

    /// List protected routes and their roles
    Routes(RoutesCommand),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Logout(_) => "logout",
            Self::Whoami(_) => "whoami",
            Self::Check(_) => "check",
            Self::Authorize(_) => "authorize",
            Self::Routes(_) => "routes",
        }
    }
}

impl Cli {
    /// Load configuration from `--config` or the current project.
    ///
    /// An explicit file's directory becomes the project directory, so
    /// relative session paths sit next to it.
    pub fn load_config(&self) -> Result<(EventfundConfig, ConfigLoader), CliError> {
        match &self.config {
            Some(path) => {
                let project_dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                let loader = ConfigLoader::new(project_dir);
                let config = loader.load_file(path)?;
                Ok((config, loader))
            }
            None => {
                let loader = ConfigLoader::default();
                let config = loader.load()?;
                Ok((config, loader))
            }
        }
    }

    /// Execute the selected command.
    pub async fn execute(self) -> Result<(), CliError> {
        let (config, loader) = self.load_config()?;
        let ctx = CommandContext {
            session_path: loader.session_path(&config),
            config,
            format: self.format,
        };
        debug!(session = %ctx.session_path.display(), mock = ctx.config.api.mock, "Context ready");

        let timer = Timer::start(self.command.name());
        let result = match self.command {
            Command::Login(cmd) => cmd.execute(&ctx).await,
            Command::Logout(cmd) => cmd.execute(&ctx),
            Command::Whoami(cmd) => cmd.execute(&ctx).await,
            Command::Check(cmd) => cmd.execute(&ctx).await,
            Command::Authorize(cmd) => cmd.execute(&ctx).await,
            Command::Routes(cmd) => cmd.execute(&ctx),
        };
        timer.finish();
        result
    }
}

/// The backend seen through both of its contracts.
pub struct Backend {
    pub api: Arc<dyn AuthApi>,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: EventfundConfig,
    pub session_path: PathBuf,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Session store backed by the configured file.
    pub fn store(&self) -> Arc<FileStore> {
        Arc::new(FileStore::new(&self.session_path))
    }

    /// Mock or HTTP backend, per `api.mock`.
    pub fn backend(&self) -> Result<Backend, CliError> {
        if self.config.api.mock {
            let mock = Arc::new(MockAuthApi::new());
            return Ok(Backend {
                api: mock.clone(),
                verifier: mock,
            });
        }

        let http = Arc::new(HttpAuthApi::from_config(&self.config.api)?);
        Ok(Backend {
            api: http.clone(),
            verifier: http,
        })
    }

    /// Guard over the session file, verifying tokens if configured.
    pub fn guard(&self) -> Result<AccessGuard, CliError> {
        let backend = self.backend()?;
        Ok(AccessGuard::from_config(
            &self.config.guard,
            self.store(),
            backend.verifier,
        ))
    }
}
