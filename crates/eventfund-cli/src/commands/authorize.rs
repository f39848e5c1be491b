//! Authorize command implementation.

use clap::Parser;
use eventfund_auth::{AccessPolicy, Role};

use super::check::AccessReport;
use crate::cli::CommandContext;
use crate::error::CliError;

/// Check the session against an explicit set of roles
#[derive(Debug, Parser)]
pub struct AuthorizeCommand {
    /// Role allowed in (repeatable)
    #[arg(
        long = "role",
        value_name = "ROLE",
        required_unless_present = "any_role",
        conflicts_with = "any_role"
    )]
    pub roles: Vec<Role>,

    /// Allow any logged-in role
    #[arg(long)]
    pub any_role: bool,

    /// Path recorded in the audit log
    #[arg(long, default_value = "-")]
    pub path: String,
}

impl AuthorizeCommand {
    fn policy(&self) -> AccessPolicy {
        if self.any_role {
            AccessPolicy::any_role()
        } else {
            self.roles.iter().copied().collect()
        }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let policy = self.policy();
        let decision = ctx.guard()?.authorize_at(&self.path, &policy).await;
        AccessReport::guarded(&self.path, &policy, decision).finish(ctx)
    }
}
