//! In-process stand-in for the auth backend.

use super::{AuthApi, Credentials, LoginResponse, TokenVerifier, UserProfile};
use crate::error::AuthError;
use async_trait::async_trait;
use dashmap::DashMap;
use eventfund_common_core::Role;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::debug;

#[derive(Debug, Clone)]
struct MockUser {
    password: String,
    token: String,
    profile: UserProfile,
}

/// Canned backend with one user per role.
///
/// Seeded users are `<role>@eventfund.io` with password `<role>123`, and
/// receive the token `mock-token-<role>`.
#[derive(Debug)]
pub struct MockAuthApi {
    users: DashMap<String, MockUser>,
    offline: AtomicBool,
    login_calls: AtomicUsize,
    verify_calls: AtomicUsize,
}

impl MockAuthApi {
    pub fn new() -> Self {
        let api = Self::empty();
        for (id, role) in Role::ALL.iter().enumerate() {
            let name = role.as_str();
            api.insert(
                format!("{name}@eventfund.io"),
                format!("{name}123"),
                format!("mock-token-{name}"),
                UserProfile {
                    id: (id + 1).to_string(),
                    email: format!("{name}@eventfund.io"),
                    name: format!("Demo {}", capitalize(name)),
                    role: name.to_string(),
                },
            );
        }
        api
    }

    /// A backend with no users.
    pub fn empty() -> Self {
        Self {
            users: DashMap::new(),
            offline: AtomicBool::new(false),
            login_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
        }
    }

    /// Add a user whose wire role is `role`, which need not be a known role.
    pub fn with_user(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        let email = email.into();
        let id = (self.users.len() + 1).to_string();
        let profile = UserProfile {
            id,
            email: email.clone(),
            name: String::new(),
            role: role.into(),
        };
        self.insert(email, password.into(), token.into(), profile);
        self
    }

    /// Make every call fail as if the network were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Drop the user holding `token`, so it no longer verifies.
    pub fn revoke(&self, token: &str) {
        self.users.retain(|_, user| user.token != token);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    fn insert(&self, email: String, password: String, token: String, profile: UserProfile) {
        self.users.insert(
            email.to_ascii_lowercase(),
            MockUser {
                password,
                token,
                profile,
            },
        );
    }

    fn check_online(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::Transport("mock backend offline".into()));
        }
        Ok(())
    }
}

impl Default for MockAuthApi {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[async_trait]
impl TokenVerifier for MockAuthApi {
    async fn current_user(&self, token: &str) -> Result<UserProfile, AuthError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        self.users
            .iter()
            .find(|entry| entry.token == token)
            .map(|entry| entry.profile.clone())
            .ok_or(AuthError::Unauthorized)
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let user = self
            .users
            .get(&credentials.email.trim().to_ascii_lowercase())
            .filter(|user| user.password == credentials.password)
            .ok_or(AuthError::InvalidCredentials)?;

        debug!(email = %credentials.email, role = %user.profile.role, "Mock login accepted");
        Ok(LoginResponse {
            token: user.token.clone(),
            role: user.profile.role.clone(),
        })
    }
}
