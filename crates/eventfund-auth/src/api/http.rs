//! HTTP client for the platform auth endpoints.

use super::{AuthApi, Credentials, LoginResponse, TokenVerifier, UserProfile};
use crate::error::AuthError;
use async_trait::async_trait;
use eventfund_common_config::ApiConfig;
use eventfund_common_http::{HttpClient, HttpConfig};
use eventfund_common_log::spans::api_span;
use std::time::Duration;
use tracing::{debug, Instrument};

/// Login endpoint, relative to the API base URL.
pub const LOGIN_PATH: &str = "/auth/login";
/// Current-user endpoint, relative to the API base URL.
pub const CURRENT_USER_PATH: &str = "/auth/me";

/// Auth API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: HttpClient,
}

impl HttpAuthApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build from API configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AuthError> {
        let http = HttpConfig::new(config.base_url.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs));
        let client = HttpClient::new(http).map_err(|e| AuthError::from_http(e, AuthError::Unauthorized))?;
        Ok(Self::new(client))
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl TokenVerifier for HttpAuthApi {
    async fn current_user(&self, token: &str) -> Result<UserProfile, AuthError> {
        async {
            let profile: UserProfile = self
                .client
                .get_json(CURRENT_USER_PATH, Some(token))
                .await
                .map_err(|e| AuthError::from_http(e, AuthError::Unauthorized))?;
            debug!(user_id = %profile.id, role = %profile.role, "Token verified");
            Ok::<_, AuthError>(profile)
        }
        .instrument(api_span("current_user"))
        .await
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        async {
            let body: LoginResponse = self
                .client
                .post_json(LOGIN_PATH, credentials)
                .await
                .map_err(|e| AuthError::from_http(e, AuthError::InvalidCredentials))?;
            debug!(email = %credentials.email, role = %body.role, "Login accepted");
            Ok::<_, AuthError>(body)
        }
        .instrument(api_span("login"))
        .await
    }
}
