//! Logout command implementation.

use clap::Parser;
use eventfund_auth::logout;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, StatusOutput};

/// Forget the stored session
#[derive(Debug, Parser)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        logout(ctx.store().as_ref())?;
        print_output(ctx, &StatusOutput::success("Logged out"))
    }
}
