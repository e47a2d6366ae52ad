//! Permission strings attached to roles

use serde::{Deserialize, Serialize};

/// Well-known permission names, in `resource:verb` form.
pub mod permisos {
    pub const USERS_READ: &str = "users:read";
    pub const USERS_WRITE: &str = "users:write";
    pub const USERS_DELETE: &str = "users:delete";
    pub const QUOTES_READ: &str = "quotes:read";
    pub const QUOTES_WRITE: &str = "quotes:write";
    pub const QUOTES_DELETE: &str = "quotes:delete";
}

/// Ordered set of permission strings granted to a role.
///
/// Membership is an exact string match; there is no wildcard or hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(Vec<String>);

impl PermissionSet {
    pub fn new(permissions: Vec<String>) -> Self {
        Self(permissions)
    }

    /// Exact membership test
    pub fn contains(&self, permission: &str) -> bool {
        self.0.iter().any(|p| p == permission)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(permissions: Vec<String>) -> Self {
        Self(permissions)
    }
}

impl From<Vec<&str>> for PermissionSet {
    fn from(permissions: Vec<&str>) -> Self {
        Self(permissions.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_exact_match_only() {
        let set = PermissionSet::from(vec![permisos::QUOTES_READ, permisos::QUOTES_WRITE]);
        assert!(set.contains("quotes:read"));
        assert!(set.contains("quotes:write"));
        assert!(!set.contains("quotes:delete"));
        assert!(!set.contains("quotes"));
        assert!(!set.contains("QUOTES:READ"));
    }

    #[test]
    fn test_empty_set() {
        let set = PermissionSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(permisos::USERS_READ));
    }

    #[test]
    fn test_serde_transparent() {
        let set = PermissionSet::from(vec!["users:read"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[\"users:read\"]");

        let parsed: PermissionSet = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert!(parsed.contains("a"));
        assert!(parsed.contains("b"));
    }
}
