//! CLI error handling.

use eventfund_auth::{AuthError, DenyReason};
use eventfund_common_config::ConfigError;
use thiserror::Error;

use crate::Exit;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<ConfigError>,
        hint: Option<String>,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("access denied ({reason}); redirect to {redirect}")]
    Denied { redirect: String, reason: DenyReason },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Auth(e) if e.is_transport() => Exit::NetworkError,
            Self::Auth(_) | Self::Other(_) => Exit::GeneralError,
            Self::Denied { .. } => Exit::AccessDenied,
        }
    }

    /// Suggested next step, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::Auth(AuthError::InvalidCredentials) => Some("check the email and password"),
            Self::Auth(AuthError::InvalidRole(_)) => {
                Some("the stored session is corrupt; run `eventfund logout` and log in again")
            }
            Self::Auth(e) if e.is_transport() => Some("is the API reachable? see api.base_url"),
            Self::Denied {
                reason: DenyReason::MissingCredentials | DenyReason::VerificationFailed,
                ..
            } => Some("run `eventfund login`"),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::NotFound { .. } => Some("pass --config or create .eventfund/config.yaml"),
            ConfigError::ParseError { .. } | ConfigError::ValidationError { .. } => {
                Some("fix the configuration file and retry")
            }
            _ => None,
        };
        Self::Config {
            message: format!("configuration error: {err}"),
            source: Some(err),
            hint: hint.map(str::to_string),
        }
    }
}
