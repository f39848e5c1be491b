//! Check command implementation.

use clap::Parser;
use eventfund_auth::{AccessPolicy, Decision, DenyReason, Role, RouteAccess, RouteOutcome, RouteTable};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Check whether the session may open a route
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Route path, e.g. /admin/dashboard
    pub path: String,
}

/// Result of a guard check, as printed.
#[derive(Debug, Serialize)]
pub struct AccessReport {
    pub path: String,
    pub access: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
}

impl AccessReport {
    pub fn public(path: &str) -> Self {
        Self {
            path: path.to_string(),
            access: "public",
            policy: None,
            role: None,
            redirect: None,
            reason: None,
        }
    }

    pub fn guarded(path: &str, policy: &AccessPolicy, decision: Decision) -> Self {
        let mut report = Self::public(path);
        report.policy = Some(policy.to_string());
        match decision {
            Decision::Allow(session) => {
                report.access = "allowed";
                report.role = Some(session.role);
            }
            Decision::Deny { redirect, reason } => {
                report.access = "denied";
                report.redirect = Some(redirect);
                report.reason = Some(reason);
            }
        }
        report
    }

    /// Print the report, then fail with [`CliError::Denied`] if access was denied.
    pub fn finish(self, ctx: &CommandContext) -> Result<(), CliError> {
        print_output(ctx, &self)?;
        match (self.redirect, self.reason) {
            (Some(redirect), Some(reason)) => Err(CliError::Denied { redirect, reason }),
            _ => Ok(()),
        }
    }
}

impl FormattedOutput for AccessReport {
    fn format_text(&self) -> String {
        let mut text = format!("{}: {}", self.path, self.access);
        if let Some(role) = self.role {
            text.push_str(&format!(" as {role}"));
        }
        if let Some(policy) = &self.policy {
            text.push_str(&format!(" (requires {policy})"));
        }
        if let (Some(redirect), Some(reason)) = (&self.redirect, self.reason) {
            text.push_str(&format!("\nReason: {reason}\nRedirect: {redirect}"));
        }
        text
    }
}

impl CheckCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let table = RouteTable::dashboard();
        let guard = ctx.guard()?;

        let report = match (table.resolve(&self.path), table.authorize(&guard, &self.path).await) {
            (RouteAccess::Protected(policy), RouteOutcome::Guarded(decision)) => {
                AccessReport::guarded(&self.path, &policy, decision)
            }
            _ => AccessReport::public(&self.path),
        };
        report.finish(ctx)
    }
}
