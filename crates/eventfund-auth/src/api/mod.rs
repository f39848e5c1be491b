//! Backend auth API contract and clients.

mod http;
mod mock;

pub use http::{HttpAuthApi, CURRENT_USER_PATH, LOGIN_PATH};
pub use mock::MockAuthApi;

use crate::error::AuthError;
use async_trait::async_trait;
use eventfund_common_core::{Role, RoleParseError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login form payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body returned by a successful login. The role is unparsed wire text.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// User record returned by the current-user endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: String,
}

impl UserProfile {
    /// Parse the wire role.
    pub fn role(&self) -> Result<Role, RoleParseError> {
        Role::parse(&self.role)
    }
}

/// Confirms that a stored token is still valid.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Fetch the user the token belongs to.
    async fn current_user(&self, token: &str) -> Result<UserProfile, AuthError>;
}

/// The backend's login contract. Every API can also verify tokens.
#[async_trait]
pub trait AuthApi: TokenVerifier {
    /// Exchange credentials for a token and role.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;
}
