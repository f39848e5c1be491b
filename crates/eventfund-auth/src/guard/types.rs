//! Guard decisions and states.

use crate::session::Session;
use serde::Serialize;
use std::fmt;

/// Why a guard check denied access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No token or no role in storage.
    MissingCredentials,
    /// The stored role is not a platform role.
    InvalidRole,
    /// The role is valid but not in the policy.
    RoleNotPermitted,
    /// The backend rejected the token, or could not be reached.
    VerificationFailed,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::InvalidRole => "invalid_role",
            Self::RoleNotPermitted => "role_not_permitted",
            Self::VerificationFailed => "verification_failed",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one authorize call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(Session),
    Deny { redirect: String, reason: DenyReason },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// Where to send the user, if denied.
    pub fn redirect(&self) -> Option<&str> {
        match self {
            Self::Allow(_) => None,
            Self::Deny { redirect, .. } => Some(redirect),
        }
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Self::Allow(_) => None,
            Self::Deny { reason, .. } => Some(*reason),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Allow(session) => Some(session),
            Self::Deny { .. } => None,
        }
    }
}

/// State of a mounted guard.
///
/// `Checking` is the only non-terminal state; a new check re-enters it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Checking,
    Allowed(Session),
    Denied { redirect: String, reason: DenyReason },
}

impl GuardState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Checking)
    }
}

impl From<Decision> for GuardState {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Allow(session) => Self::Allowed(session),
            Decision::Deny { redirect, reason } => Self::Denied { redirect, reason },
        }
    }
}
