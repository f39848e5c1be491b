//! Route table mapping path prefixes to access policies.

use crate::guard::{AccessGuard, Decision};
use crate::policy::AccessPolicy;
use eventfund_common_core::Role;
use std::collections::BTreeMap;
use tracing::trace;

/// How a path is protected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Protected(AccessPolicy),
}

/// Result of checking a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// No policy covers the path; the guard was not consulted.
    Public,
    Guarded(Decision),
}

impl RouteOutcome {
    /// Can the path be rendered?
    pub fn is_allowed(&self) -> bool {
        match self {
            Self::Public => true,
            Self::Guarded(decision) => decision.is_allowed(),
        }
    }
}

/// Prefix-matched route policies.
///
/// A prefix matches a path when it equals the path or is followed by `/`
/// in it; `/admin` covers `/admin/users` but not `/administer`. The longest
/// matching prefix wins. Unmatched paths are public.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, AccessPolicy>,
}

impl RouteTable {
    /// An empty table: every path is public.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard layout of the platform.
    pub fn dashboard() -> Self {
        Self::new()
            .protect("/admin", AccessPolicy::only(Role::Admin))
            .protect("/organizer", AccessPolicy::only(Role::Organizer))
            .protect("/investor", AccessPolicy::only(Role::Investor))
            .protect("/officer", AccessPolicy::only(Role::Officer))
            .protect(
                "/proposals",
                AccessPolicy::new([Role::Admin, Role::Officer, Role::Organizer]),
            )
            .protect(
                "/events",
                AccessPolicy::new([Role::Investor, Role::Organizer, Role::Admin]),
            )
            .protect("/profile", AccessPolicy::any_role())
    }

    /// Protect `prefix` with `policy`, replacing any previous policy.
    pub fn protect(mut self, prefix: &str, policy: AccessPolicy) -> Self {
        self.routes.insert(normalize(prefix), policy);
        self
    }

    /// Resolve the access rule for `path`.
    pub fn resolve(&self, path: &str) -> RouteAccess {
        let path = normalize(path);
        let matched = self
            .routes
            .iter()
            .filter(|(prefix, _)| covers(prefix, &path))
            .max_by_key(|(prefix, _)| prefix.len());

        match matched {
            Some((prefix, policy)) => {
                trace!(path = %path, prefix = %prefix, "Route matched");
                RouteAccess::Protected(policy.clone())
            }
            None => RouteAccess::Public,
        }
    }

    /// Check `path` against the guard. Public paths never touch storage.
    pub async fn authorize(&self, guard: &AccessGuard, path: &str) -> RouteOutcome {
        match self.resolve(path) {
            RouteAccess::Public => RouteOutcome::Public,
            RouteAccess::Protected(policy) => {
                RouteOutcome::Guarded(guard.authorize_at(&normalize(path), &policy).await)
            }
        }
    }

    /// Registered prefixes and their policies, sorted by prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccessPolicy)> {
        self.routes.iter().map(|(prefix, policy)| (prefix.as_str(), policy))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Canonical form of a route path.
///
/// Query and fragment are dropped, empty and `.` segments removed and `..`
/// resolved (never above the root), so `//admin/` and `/events/../admin`
/// both become `/admin`.
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.trim().split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

fn covers(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::guard::DenyReason;
    use crate::session::{ROLE_KEY, TOKEN_KEY};
    use crate::store::{MemoryStore, SessionStore};
    use std::sync::Arc;

    #[test]
    fn test_dashboard_resolution() {
        let table = RouteTable::dashboard();
        assert_eq!(table.len(), 7);
        assert_eq!(
            table.resolve("/admin/users"),
            RouteAccess::Protected(AccessPolicy::only(Role::Admin))
        );
        assert_eq!(
            table.resolve("/proposals/12/vote"),
            RouteAccess::Protected(AccessPolicy::new([Role::Admin, Role::Officer, Role::Organizer]))
        );
        assert_eq!(
            table.resolve("/profile"),
            RouteAccess::Protected(AccessPolicy::any_role())
        );
        assert_eq!(table.resolve("/"), RouteAccess::Public);
        assert_eq!(table.resolve("/login"), RouteAccess::Public);
        assert_eq!(table.resolve("/register"), RouteAccess::Public);
    }

    #[test]
    fn test_segment_boundaries() {
        let table = RouteTable::dashboard();
        assert_eq!(table.resolve("/administer"), RouteAccess::Public);
        assert_eq!(table.resolve("/eventsfeed"), RouteAccess::Public);
        assert!(matches!(table.resolve("/admin/"), RouteAccess::Protected(_)));
        assert!(matches!(table.resolve("admin?tab=users"), RouteAccess::Protected(_)));

        let admin = RouteAccess::Protected(AccessPolicy::only(Role::Admin));
        assert_eq!(table.resolve("//admin/dashboard"), admin);
        assert_eq!(table.resolve("/./admin"), admin);
        assert_eq!(table.resolve("/investor/../admin"), admin);
        assert_eq!(table.resolve("/../../admin//users/"), admin);
        assert_eq!(table.resolve("/admin/.."), RouteAccess::Public);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("events//9/./"), "/events/9");
        assert_eq!(normalize("/a/b/../c#top"), "/a/c");
    }

    #[tokio::test]
    async fn test_non_canonical_paths_reach_guard() {
        let guard = AccessGuard::new(Arc::new(MemoryStore::new()));
        let table = RouteTable::dashboard();

        for path in ["//admin/dashboard", "/./admin", "/investor/../admin"] {
            match table.authorize(&guard, path).await {
                RouteOutcome::Guarded(decision) => {
                    assert_eq!(decision.reason(), Some(DenyReason::MissingCredentials), "{path}");
                }
                other => panic!("{path} resolved as {other:?}"),
            }
        }
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table = RouteTable::new()
            .protect("/events", AccessPolicy::any_role())
            .protect("/events/manage/", AccessPolicy::only(Role::Organizer));

        assert_eq!(
            table.resolve("/events/manage/3"),
            RouteAccess::Protected(AccessPolicy::only(Role::Organizer))
        );
        assert_eq!(
            table.resolve("/events/3"),
            RouteAccess::Protected(AccessPolicy::any_role())
        );
        let prefixes: Vec<&str> = table.iter().map(|(p, _)| p).collect();
        assert_eq!(prefixes, vec!["/events", "/events/manage"]);
    }

    struct PanickingStore;

    impl SessionStore for PanickingStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            panic!("public route read storage")
        }
        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Backend("read-only".into()))
        }
        fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Backend("read-only".into()))
        }
    }

    #[tokio::test]
    async fn test_public_route_skips_guard() {
        let guard = AccessGuard::new(Arc::new(PanickingStore));
        let outcome = RouteTable::dashboard().authorize(&guard, "/login").await;
        assert_eq!(outcome, RouteOutcome::Public);
        assert!(outcome.is_allowed());
    }

    #[tokio::test]
    async fn test_guarded_routes() {
        let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "abc"), (ROLE_KEY, "organizer")]));
        let guard = AccessGuard::new(store);
        let table = RouteTable::dashboard();

        assert!(table.authorize(&guard, "/organizer/dashboard").await.is_allowed());
        assert!(table.authorize(&guard, "/events/9").await.is_allowed());

        match table.authorize(&guard, "/investor/portfolio").await {
            RouteOutcome::Guarded(decision) => {
                assert_eq!(decision.reason(), Some(DenyReason::RoleNotPermitted));
            }
            other => panic!("expected guarded outcome, got {other:?}"),
        }
    }
}
