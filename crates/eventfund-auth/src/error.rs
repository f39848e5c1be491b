//! Error types for sessions and the auth API.

use eventfund_common_core::RoleParseError;
use eventfund_common_http::HttpError;
use thiserror::Error;

/// Session store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Session store result.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from login, logout and token verification.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error(transparent)]
    InvalidRole(#[from] RoleParseError),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed API response: {0}")]
    Decode(String),

    #[error("Session storage failed: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Translate an HTTP failure; `denied` is returned for 401/403.
    pub(crate) fn from_http(err: HttpError, denied: AuthError) -> Self {
        match err {
            HttpError::Status { status: 401 | 403, .. } => denied,
            HttpError::Status { status, body } => AuthError::Api {
                status,
                message: body,
            },
            err @ HttpError::Decode { .. } => AuthError::Decode(err.to_string()),
            err @ HttpError::Build(_) => AuthError::ClientSetup(err.to_string()),
            other => AuthError::Transport(other.to_string()),
        }
    }

    /// Did the request fail before the backend answered?
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
