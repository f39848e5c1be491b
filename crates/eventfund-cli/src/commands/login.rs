//! Login command implementation.

use clap::Parser;
use eventfund_auth::{login, Credentials, Role};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Log in and store the session
#[derive(Debug, Parser)]
pub struct LoginCommand {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long, env = "EVENTFUND_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginOutput {
    email: String,
    role: Role,
    redirect: &'static str,
}

impl FormattedOutput for LoginOutput {
    fn format_text(&self) -> String {
        format!(
            "Logged in as {} ({})\nContinue at {}",
            self.email, self.role, self.redirect
        )
    }
}

impl LoginCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let backend = ctx.backend()?;
        let store = ctx.store();
        let credentials = Credentials::new(self.email.trim(), self.password.as_str());

        let session = login(backend.api.as_ref(), store.as_ref(), &credentials).await?;

        print_output(
            ctx,
            &LoginOutput {
                email: credentials.email,
                role: session.role,
                redirect: session.role.dashboard_path(),
            },
        )
    }
}
