//! Routes command implementation.

use clap::Parser;
use eventfund_auth::{Role, RouteTable};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// List protected routes and their roles
#[derive(Debug, Parser)]
pub struct RoutesCommand {}

#[derive(Debug, Serialize)]
struct RouteEntry {
    prefix: String,
    roles: Vec<Role>,
}

#[derive(Debug, Serialize)]
struct RoutesOutput {
    routes: Vec<RouteEntry>,
    login_path: String,
}

impl RoutesOutput {
    fn from_table(table: &RouteTable, login_path: &str) -> Self {
        Self {
            routes: table
                .iter()
                .map(|(prefix, policy)| RouteEntry {
                    prefix: prefix.to_string(),
                    roles: policy.roles().collect(),
                })
                .collect(),
            login_path: login_path.to_string(),
        }
    }
}

impl FormattedOutput for RoutesOutput {
    fn format_text(&self) -> String {
        let width = self.routes.iter().map(|r| r.prefix.len()).max().unwrap_or(0);
        let mut lines: Vec<String> = self
            .routes
            .iter()
            .map(|route| {
                let roles: Vec<&str> = route.roles.iter().map(Role::as_str).collect();
                format!("{:<width$}  {}", route.prefix, roles.join(", "))
            })
            .collect();
        lines.push(format!("Other paths are public. Denied checks redirect to {}", self.login_path));
        lines.join("\n")
    }
}

impl RoutesCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let output = RoutesOutput::from_table(&RouteTable::dashboard(), &ctx.config.guard.login_path);
        print_output(ctx, &output)
    }
}
