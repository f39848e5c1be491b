//! Platform roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A role held by a platform user.
///
/// Stored values are parsed with [`Role::parse`], which is the only place
/// role strings are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Submits event proposals.
    Organizer,
    /// Funds approved events.
    Investor,
    /// Votes on proposals.
    Officer,
}

/// Error parsing a role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct RoleParseError(pub String);

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Organizer, Role::Investor, Role::Officer];

    /// Parse a role, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, RoleParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "organizer" => Ok(Self::Organizer),
            "investor" => Ok(Self::Investor),
            "officer" => Ok(Self::Officer),
            _ => Err(RoleParseError(s.to_string())),
        }
    }

    /// Canonical lowercase name, as written to storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Organizer => "organizer",
            Self::Investor => "investor",
            Self::Officer => "officer",
        }
    }

    /// Landing route after a successful login.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Organizer => "/organizer/dashboard",
            Self::Investor => "/investor/dashboard",
            Self::Officer => "/officer/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("admin", Role::Admin ; "lowercase")]
    #[test_case("Investor", Role::Investor ; "capitalized")]
    #[test_case("ORGANIZER", Role::Organizer ; "uppercase")]
    #[test_case("  officer\n", Role::Officer ; "padded")]
    fn test_parse_normalizes(input: &str, expected: Role) {
        assert_eq!(Role::parse(input).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("guest" ; "unknown")]
    #[test_case("admins" ; "near miss")]
    fn test_parse_rejects(input: &str) {
        let err = Role::parse(input).unwrap_err();
        assert_eq!(err, RoleParseError(input.to_string()));
    }

    #[test]
    fn test_display_matches_storage_form() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_dashboard_paths_are_distinct() {
        let mut paths: Vec<_> = Role::ALL.iter().map(Role::dashboard_path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), Role::ALL.len());
        assert_eq!(Role::Officer.dashboard_path(), "/officer/dashboard");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Role::Organizer).unwrap();
        assert_eq!(json, "\"organizer\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
