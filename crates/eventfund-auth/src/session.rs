//! Authenticated session held between login and logout.

use crate::error::{AuthError, StoreResult};
use crate::store::SessionStore;
use eventfund_common_core::{Role, RoleParseError};
use std::fmt;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the role string.
pub const ROLE_KEY: &str = "user_role";

/// A logged-in identity: opaque token plus role.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

/// What the store holds for the session keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    /// Token or role absent (or the token is empty).
    Missing,
    /// Both keys present but the role is not a platform role.
    UnknownRole(RoleParseError),
    /// A usable session.
    Found(Session),
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    /// Read the session keys without interpreting failures.
    pub fn lookup(store: &dyn SessionStore) -> StoreResult<SessionLookup> {
        let token = store.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let role = store.get(ROLE_KEY)?;

        Ok(match (token, role) {
            (Some(token), Some(role)) => match Role::parse(&role) {
                Ok(role) => SessionLookup::Found(Session { token, role }),
                Err(e) => SessionLookup::UnknownRole(e),
            },
            _ => SessionLookup::Missing,
        })
    }

    /// Load the stored session, rejecting unknown roles.
    pub fn load(store: &dyn SessionStore) -> Result<Option<Session>, AuthError> {
        match Self::lookup(store)? {
            SessionLookup::Missing => Ok(None),
            SessionLookup::UnknownRole(e) => Err(e.into()),
            SessionLookup::Found(session) => Ok(Some(session)),
        }
    }

    /// Persist the session, overwriting any previous one.
    pub fn save(&self, store: &dyn SessionStore) -> StoreResult<()> {
        store.set(TOKEN_KEY, &self.token)?;
        store.set(ROLE_KEY, self.role.as_str())
    }

    /// Remove both session keys.
    pub fn clear(store: &dyn SessionStore) -> StoreResult<()> {
        // Token first: a leftover role without a token reads as logged out.
        store.remove(TOKEN_KEY)?;
        store.remove(ROLE_KEY)
    }

    /// Short token prefix safe to show in logs and terminals.
    pub fn token_hint(&self) -> String {
        let prefix: String = self.token.chars().take(6).collect();
        format!("{prefix}…")
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_lookup_missing() {
        let store = MemoryStore::new();
        assert_eq!(Session::lookup(&store).unwrap(), SessionLookup::Missing);

        store.set(ROLE_KEY, "admin").unwrap();
        assert_eq!(Session::lookup(&store).unwrap(), SessionLookup::Missing);

        store.set(TOKEN_KEY, "").unwrap();
        assert_eq!(Session::lookup(&store).unwrap(), SessionLookup::Missing);
    }

    #[test]
    fn test_lookup_normalizes_role() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc"), (ROLE_KEY, "Investor")]);
        assert_eq!(
            Session::lookup(&store).unwrap(),
            SessionLookup::Found(Session::new("abc", Role::Investor))
        );
    }

    #[test]
    fn test_lookup_unknown_role() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc"), (ROLE_KEY, "sponsor")]);
        assert!(matches!(
            Session::lookup(&store).unwrap(),
            SessionLookup::UnknownRole(_)
        ));
        assert!(matches!(Session::load(&store), Err(AuthError::InvalidRole(_))));
    }

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStore::new();
        let session = Session::new("tok-123", Role::Officer);
        session.save(&store).unwrap();

        assert_eq!(store.get(ROLE_KEY).unwrap().as_deref(), Some("officer"));
        assert_eq!(Session::load(&store).unwrap(), Some(session));

        Session::clear(&store).unwrap();
        assert!(store.is_empty());
        assert_eq!(Session::load(&store).unwrap(), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("super-secret-token", Role::Admin);
        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("Admin"));
        assert_eq!(session.token_hint(), "super-…");
    }
}
