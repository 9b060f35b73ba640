//! Actor roles and the approval gate.

use serde::{Deserialize, Serialize};

/// User role, ordered from lowest to highest privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only access to documents and reports.
    Viewer = 0,
    /// Can create, edit, and submit procurement documents.
    Procurement = 1,
    /// Project manager: everything Procurement can do, plus approve/reject.
    Pm = 2,
    /// Full access including user and settings administration.
    Admin = 3,
}

impl Role {
    /// Parses a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "viewer" => Some(Self::Viewer),
            "procurement" => Some(Self::Procurement),
            "pm" => Some(Self::Pm),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Procurement => "procurement",
            Self::Pm => "pm",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may approve or reject a pending document.
    #[must_use]
    pub const fn can_decide(self) -> bool {
        matches!(self, Self::Pm | Self::Admin)
    }

    /// Whether this role may create and edit documents.
    #[must_use]
    pub const fn can_author(self) -> bool {
        matches!(self, Self::Procurement | Self::Pm | Self::Admin)
    }

    /// Whether this role may administer users and system settings.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for role in [Role::Viewer, Role::Procurement, Role::Pm, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_only_pm_and_admin_decide() {
        assert!(!Role::Viewer.can_decide());
        assert!(!Role::Procurement.can_decide());
        assert!(Role::Pm.can_decide());
        assert!(Role::Admin.can_decide());
    }

    #[test]
    fn test_author_gate() {
        assert!(!Role::Viewer.can_author());
        assert!(Role::Procurement.can_author());
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Viewer < Role::Procurement);
        assert!(Role::Pm < Role::Admin);
    }
}
