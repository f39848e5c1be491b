//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Types that can be printed as text or JSON.
pub trait FormattedOutput: Serialize {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Render `value` in the selected format.
pub fn render<T: FormattedOutput>(format: OutputFormat, value: &T) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(value.format_text()),
        OutputFormat::Json => value
            .format_json()
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}"))),
    }
}

/// Print `value` to stdout.
pub fn print_output<T: FormattedOutput>(ctx: &CommandContext, value: &T) -> Result<(), CliError> {
    println!("{}", render(ctx.format, value)?);
    Ok(())
}

/// A one-line status message.
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub status: &'static str,
    pub message: String,
}

impl StatusOutput {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "ok",
            message: message.into(),
        }
    }
}

impl FormattedOutput for StatusOutput {
    fn format_text(&self) -> String {
        self.message.clone()
    }
}
