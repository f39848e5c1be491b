//! Role-based access guard.
//!
//! The guard reads the stored session, checks its role against a policy,
//! optionally confirms the token with the backend, and either allows or
//! redirects to the login boundary. Every failure path denies.

pub mod audit;
pub mod types;
pub mod view;

pub use audit::{log_decision, GuardAuditEvent};
pub use types::{Decision, DenyReason, GuardState};
pub use view::ProtectedView;

use crate::api::TokenVerifier;
use crate::policy::AccessPolicy;
use crate::session::{Session, SessionLookup};
use crate::store::SessionStore;
use eventfund_common_config::GuardConfig;
use eventfund_common_core::Role;
use eventfund_common_log::spans::guard_span;
use std::sync::Arc;
use tracing::{debug, warn, Instrument};

/// Default redirect target for denied checks.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Path recorded when a check is not tied to a route.
const UNROUTED: &str = "-";

/// Gate for protected regions.
#[derive(Clone)]
pub struct AccessGuard {
    store: Arc<dyn SessionStore>,
    verifier: Option<Arc<dyn TokenVerifier>>,
    login_path: String,
}

impl AccessGuard {
    /// Guard without token verification.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            verifier: None,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    /// Guard configured from [`GuardConfig`]. The verifier is used only when
    /// `verify_token` is set.
    pub fn from_config(
        config: &GuardConfig,
        store: Arc<dyn SessionStore>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        let guard = Self::new(store).with_login_path(config.login_path.clone());
        if config.verify_token {
            guard.with_verifier(verifier)
        } else {
            guard
        }
    }

    /// Confirm tokens with `verifier` before allowing.
    pub fn with_verifier(mut self, verifier: Arc<dyn TokenVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn verifies_tokens(&self) -> bool {
        self.verifier.is_some()
    }

    /// Decide whether the stored session may enter a region under `policy`.
    pub async fn authorize(&self, policy: &AccessPolicy) -> Decision {
        self.authorize_at(UNROUTED, policy).await
    }

    /// Like [`authorize`](Self::authorize), recording `path` in the audit log.
    pub async fn authorize_at(&self, path: &str, policy: &AccessPolicy) -> Decision {
        async {
            let (decision, role) = self.decide(policy).await;
            log_decision(path, role, &decision);
            decision
        }
        .instrument(guard_span(path))
        .await
    }

    async fn decide(&self, policy: &AccessPolicy) -> (Decision, Option<Role>) {
        let session = match Session::lookup(self.store.as_ref()) {
            Ok(SessionLookup::Found(session)) => session,
            Ok(SessionLookup::Missing) => {
                return (self.deny(DenyReason::MissingCredentials), None);
            }
            Ok(SessionLookup::UnknownRole(e)) => {
                debug!(error = %e, "Stored role rejected");
                return (self.deny(DenyReason::InvalidRole), None);
            }
            Err(e) => {
                warn!(error = %e, "Session store unreadable, treating as signed out");
                return (self.deny(DenyReason::MissingCredentials), None);
            }
        };

        let role = session.role;
        if !policy.allows(role) {
            debug!(role = %role, policy = %policy, "Role not in policy");
            return (self.deny(DenyReason::RoleNotPermitted), Some(role));
        }

        if let Some(verifier) = &self.verifier {
            if let Err(e) = verifier.current_user(&session.token).await {
                warn!(error = %e, role = %role, "Token verification failed, clearing session");
                if let Err(e) = Session::clear(self.store.as_ref()) {
                    warn!(error = %e, "Failed to clear session");
                }
                return (self.deny(DenyReason::VerificationFailed), Some(role));
            }
        }

        (Decision::Allow(session), Some(role))
    }

    fn deny(&self, reason: DenyReason) -> Decision {
        Decision::Deny {
            redirect: self.login_path.clone(),
            reason,
        }
    }
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGuard")
            .field("login_path", &self.login_path)
            .field("verifies_tokens", &self.verifies_tokens())
            .finish_non_exhaustive()
    }
}
