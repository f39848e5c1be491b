//! Whoami command implementation.

use clap::Parser;
use eventfund_auth::{DenyReason, Role, Session, UserProfile};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Show the stored session
#[derive(Debug, Parser)]
pub struct WhoamiCommand {
    /// Also confirm the token with the backend
    #[arg(long)]
    pub verify: bool,
}

#[derive(Debug, Serialize)]
struct WhoamiOutput {
    role: Role,
    token: String,
    dashboard: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<UserProfile>,
}

impl FormattedOutput for WhoamiOutput {
    fn format_text(&self) -> String {
        let mut text = format!(
            "Role: {}\nToken: {}\nDashboard: {}",
            self.role, self.token, self.dashboard
        );
        if let Some(profile) = &self.profile {
            text.push_str(&format!("\nUser: {} <{}> (id {})", profile.name, profile.email, profile.id));
        }
        text
    }
}

impl WhoamiCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let store = ctx.store();
        let Some(session) = Session::load(store.as_ref())? else {
            return Err(CliError::Denied {
                redirect: ctx.config.guard.login_path.clone(),
                reason: DenyReason::MissingCredentials,
            });
        };

        let profile = if self.verify {
            Some(ctx.backend()?.verifier.current_user(&session.token).await?)
        } else {
            None
        };

        print_output(
            ctx,
            &WhoamiOutput {
                role: session.role,
                token: session.token_hint(),
                dashboard: session.role.dashboard_path(),
                profile,
            },
        )
    }
}
