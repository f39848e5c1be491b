//! Login and logout.

use crate::api::{AuthApi, Credentials};
use crate::error::AuthError;
use crate::session::Session;
use crate::store::SessionStore;
use eventfund_common_core::Role;
use tracing::{info, warn};

/// Exchange credentials for a session and persist it.
///
/// Storage is only written once the backend accepted the credentials and
/// returned a known role.
pub async fn login(
    api: &dyn AuthApi,
    store: &dyn SessionStore,
    credentials: &Credentials,
) -> Result<Session, AuthError> {
    let response = match api.login(credentials).await {
        Ok(response) => response,
        Err(e) => {
            warn!(email = %credentials.email, error = %e, "Login failed");
            return Err(e);
        }
    };

    if response.token.is_empty() {
        return Err(AuthError::Decode("login response has an empty token".into()));
    }
    let role = Role::parse(&response.role)?;

    let session = Session::new(response.token, role);
    session.save(store)?;
    info!(email = %credentials.email, role = %role, "Logged in");
    Ok(session)
}

/// Forget the stored session.
pub fn logout(store: &dyn SessionStore) -> Result<(), AuthError> {
    Session::clear(store)?;
    info!("Logged out");
    Ok(())
}
