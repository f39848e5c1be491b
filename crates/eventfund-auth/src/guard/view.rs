//! Guard bound to the lifetime of a mounted view.

use super::types::GuardState;
use super::AccessGuard;
use crate::policy::AccessPolicy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// A protected region that runs one guard check per policy.
///
/// State starts as [`GuardState::Checking`] and moves to a terminal state
/// when the check resolves. Changing the policy starts a new check; results
/// from older checks are dropped. Dropping the view aborts any pending check.
///
/// Must be created inside a tokio runtime.
pub struct ProtectedView {
    guard: AccessGuard,
    path: String,
    policy: AccessPolicy,
    state: Arc<watch::Sender<GuardState>>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl ProtectedView {
    /// Mount a view and start its first check.
    pub fn mount(guard: AccessGuard, policy: AccessPolicy) -> Self {
        Self::mount_at(guard, "-", policy)
    }

    /// Mount a view for a named route.
    pub fn mount_at(guard: AccessGuard, path: impl Into<String>, policy: AccessPolicy) -> Self {
        let (state, _) = watch::channel(GuardState::Checking);
        let mut view = Self {
            guard,
            path: path.into(),
            policy,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        };
        view.start_check();
        view
    }

    /// Current state.
    pub fn state(&self) -> GuardState {
        self.state.borrow().clone()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.state.subscribe()
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replace the policy and re-check. A no-op if the policy is unchanged.
    pub fn set_policy(&mut self, policy: AccessPolicy) {
        if policy == self.policy {
            return;
        }
        self.policy = policy;
        self.start_check();
    }

    /// Re-check with the current policy, e.g. after the session changed.
    pub fn refresh(&mut self) {
        self.start_check();
    }

    /// Wait for the current check to finish.
    pub async fn resolved(&self) -> GuardState {
        let mut rx = self.state.subscribe();
        let result = match rx.wait_for(GuardState::is_terminal).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        result
    }

    fn start_check(&mut self) {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = GuardState::Checking;
        });

        let guard = self.guard.clone();
        let path = self.path.clone();
        let policy = self.policy.clone();
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);

        let handle = tokio::spawn(async move {
            let decision = guard.authorize_at(&path, &policy).await;
            let applied = state.send_if_modified(|state| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *state = decision.into();
                true
            });
            if !applied {
                debug!(generation, path = %path, "Discarding superseded guard result");
            }
        });

        if let Some(previous) = self.task.replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for ProtectedView {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for ProtectedView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtectedView")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TokenVerifier, UserProfile};
    use crate::error::AuthError;
    use crate::guard::DenyReason;
    use crate::session::{Session, ROLE_KEY, TOKEN_KEY};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use eventfund_common_core::Role;
    use std::time::Duration;

    /// Verifier that answers after a delay.
    struct SlowVerifier {
        delay: Duration,
        accept: bool,
    }

    #[async_trait]
    impl TokenVerifier for SlowVerifier {
        async fn current_user(&self, _token: &str) -> Result<UserProfile, AuthError> {
            tokio::time::sleep(self.delay).await;
            if self.accept {
                Ok(UserProfile {
                    id: "1".into(),
                    email: "a@eventfund.io".into(),
                    name: String::new(),
                    role: "admin".into(),
                })
            } else {
                Err(AuthError::Unauthorized)
            }
        }
    }

    fn admin_store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "abc"), (ROLE_KEY, "admin")]))
    }

    fn slow_guard(store: Arc<MemoryStore>, accept: bool) -> AccessGuard {
        AccessGuard::new(store).with_verifier(Arc::new(SlowVerifier {
            delay: Duration::from_secs(5),
            accept,
        }))
    }

    #[tokio::test]
    async fn test_mount_starts_checking_then_allows() {
        let view = ProtectedView::mount(
            AccessGuard::new(admin_store()),
            AccessPolicy::only(Role::Admin),
        );
        assert_eq!(view.state(), GuardState::Checking);
        assert_eq!(
            view.resolved().await,
            GuardState::Allowed(Session::new("abc", Role::Admin))
        );
    }

    #[tokio::test]
    async fn test_denied_state_carries_redirect() {
        let view = ProtectedView::mount_at(
            AccessGuard::new(Arc::new(MemoryStore::new())),
            "/admin",
            AccessPolicy::only(Role::Admin),
        );
        assert_eq!(
            view.resolved().await,
            GuardState::Denied {
                redirect: "/login".into(),
                reason: DenyReason::MissingCredentials,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_before_resolution_is_noop() {
        let store = admin_store();
        let view = ProtectedView::mount(slow_guard(store.clone(), false), AccessPolicy::only(Role::Admin));
        let rx = view.subscribe();

        tokio::task::yield_now().await;
        drop(view);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(*rx.borrow(), GuardState::Checking);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_check_is_ignored() {
        let store = admin_store();
        let mut view = ProtectedView::mount(slow_guard(store, true), AccessPolicy::only(Role::Admin));
        tokio::task::yield_now().await;

        view.set_policy(AccessPolicy::only(Role::Investor));
        assert_eq!(view.state(), GuardState::Checking);

        let state = view.resolved().await;
        assert!(matches!(
            state,
            GuardState::Denied {
                reason: DenyReason::RoleNotPermitted,
                ..
            }
        ));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(view.state(), state);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_verification_resolves() {
        let store = admin_store();
        let view = ProtectedView::mount(slow_guard(store.clone(), false), AccessPolicy::any_role());
        let state = view.resolved().await;
        assert!(matches!(
            state,
            GuardState::Denied {
                reason: DenyReason::VerificationFailed,
                ..
            }
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_sees_new_session() {
        let store = Arc::new(MemoryStore::new());
        let mut view = ProtectedView::mount(AccessGuard::new(store.clone()), AccessPolicy::any_role());
        assert!(matches!(view.resolved().await, GuardState::Denied { .. }));

        Session::new("tok", Role::Officer).save(store.as_ref()).unwrap();
        view.refresh();
        assert!(matches!(view.resolved().await, GuardState::Allowed(_)));
    }

    #[tokio::test]
    async fn test_same_policy_does_not_recheck() {
        let mut view = ProtectedView::mount(AccessGuard::new(admin_store()), AccessPolicy::only(Role::Admin));
        let resolved = view.resolved().await;
        view.set_policy(AccessPolicy::only(Role::Admin));
        assert_eq!(view.state(), resolved);
    }
}
