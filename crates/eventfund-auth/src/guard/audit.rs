//! Guard audit logging.

use super::types::{Decision, DenyReason};
use chrono::{DateTime, Utc};
use eventfund_common_core::Role;
use serde::Serialize;
use tracing::info;

/// One guard decision, as written to the audit log. Never carries the token.
#[derive(Debug, Clone, Serialize)]
pub struct GuardAuditEvent {
    pub timestamp: DateTime<Utc>,
    pub path: String,
    pub role: Option<Role>,
    pub granted: bool,
    pub reason: Option<DenyReason>,
}

impl GuardAuditEvent {
    pub fn new(path: &str, role: Option<Role>, decision: &Decision) -> Self {
        Self {
            timestamp: Utc::now(),
            path: path.to_string(),
            role: decision.session().map(|s| s.role).or(role),
            granted: decision.is_allowed(),
            reason: decision.reason(),
        }
    }

    /// Snake-case deny reason, or `-` when access was granted.
    pub fn reason_label(&self) -> &'static str {
        self.reason.map_or("-", |r| r.as_str())
    }

    pub fn log(&self) {
        let role = self.role.map(|r| r.as_str()).unwrap_or("-");
        if self.granted {
            info!(
                event = "guard_allowed",
                path = %self.path,
                role = %role,
                "Access granted"
            );
        } else {
            info!(
                event = "guard_denied",
                path = %self.path,
                role = %role,
                reason = %self.reason_label(),
                "Access denied"
            );
        }
    }
}

/// Log a guard decision.
pub fn log_decision(path: &str, role: Option<Role>, decision: &Decision) {
    GuardAuditEvent::new(path, role, decision).log();
}
