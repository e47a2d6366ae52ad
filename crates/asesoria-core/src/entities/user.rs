//! User entity and the authenticated identity derived from it

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{PermissionSet, TenantId};

/// Staff account managed through the admin panel.
///
/// The password hash is deliberately not part of the entity; repositories
/// expose it separately so it never travels with profile data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub rut: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role_id: Option<i64>,
    pub is_active: bool,
    pub email_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the credential state machine permits a login.
    ///
    /// `email_verified` gates login independently of `is_active`.
    #[inline]
    pub fn can_login(&self) -> bool {
        self.is_active && self.email_verified
    }
}

/// Resolved identity of an authenticated request: the user joined with its
/// role name and permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub rut: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub permissions: PermissionSet,
}

impl Identity {
    /// Exact membership test against the permission list
    pub fn require_permission(&self, permission: &str) -> Result<(), DomainError> {
        if self.permissions.contains(permission) {
            Ok(())
        } else {
            Err(DomainError::MissingPermission(permission.to_string()))
        }
    }

    pub fn require_role(&self, role: &str) -> Result<(), DomainError> {
        if self.role.as_deref() == Some(role) {
            Ok(())
        } else {
            Err(DomainError::RoleRequired(role.to_string()))
        }
    }

    pub fn require_any_role(&self, roles: &[&str]) -> Result<(), DomainError> {
        match self.role.as_deref() {
            Some(role) if roles.contains(&role) => Ok(()),
            _ => Err(DomainError::RoleRequired(roles.join(" o "))),
        }
    }

    /// Self-service ownership check: a tenant administers only their own
    /// data, so the authenticated user id must equal the resolved tenant id.
    pub fn require_tenant_match(&self, tenant: TenantId) -> Result<(), DomainError> {
        if self.user_id == tenant.into_inner() {
            Ok(())
        } else {
            Err(DomainError::TenantMismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(user_id: i64) -> Identity {
        Identity {
            user_id,
            rut: "12.345.678-9".to_string(),
            email: "asesor@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            role: Some("admin".to_string()),
            permissions: PermissionSet::from(vec!["quotes:read", "quotes:write"]),
        }
    }

    #[test]
    fn test_require_permission() {
        let id = identity(1);
        assert!(id.require_permission("quotes:read").is_ok());
        assert!(matches!(
            id.require_permission("users:delete"),
            Err(DomainError::MissingPermission(_))
        ));
    }

    #[test]
    fn test_require_role() {
        let id = identity(1);
        assert!(id.require_role("admin").is_ok());
        assert!(id.require_role("supervisor").is_err());

        let mut no_role = identity(1);
        no_role.role = None;
        assert!(no_role.require_role("admin").is_err());
    }

    #[test]
    fn test_require_any_role() {
        let id = identity(1);
        assert!(id.require_any_role(&["admin", "supervisor"]).is_ok());
        assert!(id.require_any_role(&["asesor", "supervisor"]).is_err());
    }

    #[test]
    fn test_require_tenant_match() {
        let id = identity(5);
        assert!(id.require_tenant_match(TenantId::new(5).unwrap()).is_ok());
        assert!(matches!(
            id.require_tenant_match(TenantId::new(7).unwrap()),
            Err(DomainError::TenantMismatch)
        ));
    }

    #[test]
    fn test_can_login_requires_verified_and_active() {
        let now = Utc::now();
        let mut user = User {
            id: 1,
            rut: "12.345.678-9".to_string(),
            email: "a@b.cl".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            phone: None,
            role_id: None,
            is_active: true,
            email_verified: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        assert!(user.can_login());

        user.is_active = false;
        assert!(!user.can_login());

        user.is_active = true;
        user.email_verified = false;
        assert!(!user.can_login());
    }
}
