//! Access policies.

use eventfund_common_core::Role;
use std::collections::BTreeSet;
use std::fmt;

/// The roles permitted into a protected region.
///
/// An empty policy admits nobody.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessPolicy {
    roles: BTreeSet<Role>,
}

impl AccessPolicy {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        roles.into_iter().collect()
    }

    /// Policy admitting a single role.
    pub fn only(role: Role) -> Self {
        Self::new([role])
    }

    /// Policy admitting every authenticated role.
    pub fn any_role() -> Self {
        Self::new(Role::ALL)
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl FromIterator<Role> for AccessPolicy {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self {
            roles: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.roles.is_empty() {
            return f.write_str("{}");
        }
        let names: Vec<&str> = self.roles.iter().map(Role::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only() {
        let policy = AccessPolicy::only(Role::Admin);
        assert!(policy.allows(Role::Admin));
        assert!(!policy.allows(Role::Investor));
    }

    #[test]
    fn test_any_role() {
        let policy = AccessPolicy::any_role();
        assert!(Role::ALL.iter().all(|r| policy.allows(*r)));
    }

    #[test]
    fn test_empty_admits_nobody() {
        let policy = AccessPolicy::default();
        assert!(policy.is_empty());
        assert!(Role::ALL.iter().all(|r| !policy.allows(*r)));
    }

    #[test]
    fn test_display_is_sorted() {
        let policy = AccessPolicy::new([Role::Officer, Role::Admin, Role::Admin]);
        assert_eq!(policy.to_string(), "{admin, officer}");
        assert_eq!(policy.roles().count(), 2);
        assert_eq!(AccessPolicy::default().to_string(), "{}");
    }
}
