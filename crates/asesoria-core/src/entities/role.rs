//! Role entity - static reference data

use chrono::{DateTime, Utc};

use crate::value_objects::PermissionSet;

/// Named role with its ordered permission set. Rarely mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub permissions: PermissionSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}
