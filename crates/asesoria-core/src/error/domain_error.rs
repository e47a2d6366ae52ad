//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{EstadoParseError, TenantIdError};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Role not found: {0}")]
    RoleNotFound(i64),

    #[error("Cotizacion not found: {0}")]
    CotizacionNotFound(i64),

    #[error("Cotizacion not found: {0}")]
    CotizacionRefNotFound(String),

    #[error("Comentario not found: {0}")]
    ComentarioNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    InvalidTenantId(#[from] TenantIdError),

    #[error(transparent)]
    InvalidEstado(#[from] EstadoParseError),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Required role: {0}")]
    RoleRequired(String),

    #[error("No access to data owned by another propietario")]
    TenantMismatch,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("RUT already registered")]
    RutAlreadyExists,

    #[error("Cannot delete user with associated cotizaciones")]
    UserHasDependentRecords,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",
            Self::CotizacionNotFound(_) | Self::CotizacionRefNotFound(_) => "UNKNOWN_COTIZACION",
            Self::ComentarioNotFound(_) => "UNKNOWN_COMENTARIO",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidTenantId(_) => "INVALID_TENANT_ID",
            Self::InvalidEstado(_) => "INVALID_ESTADO",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::RoleRequired(_) => "ROLE_REQUIRED",
            Self::TenantMismatch => "TENANT_MISMATCH",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::RutAlreadyExists => "RUT_ALREADY_EXISTS",
            Self::UserHasDependentRecords => "USER_HAS_DEPENDENT_RECORDS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::RoleNotFound(_)
                | Self::CotizacionNotFound(_)
                | Self::CotizacionRefNotFound(_)
                | Self::ComentarioNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidTenantId(_) | Self::InvalidEstado(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::MissingPermission(_) | Self::RoleRequired(_) | Self::TenantMismatch
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::RutAlreadyExists | Self::UserHasDependentRecords
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(1);
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::MissingPermission("users:write".to_string());
        assert_eq!(err.code(), "MISSING_PERMISSIONS");

        assert_eq!(DomainError::TenantMismatch.code(), "TENANT_MISMATCH");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound(1).is_not_found());
        assert!(DomainError::CotizacionRefNotFound("COT-1".into()).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_authorization() {
        assert!(DomainError::TenantMismatch.is_authorization());
        assert!(DomainError::MissingPermission("x".into()).is_authorization());
        assert!(!DomainError::UserNotFound(1).is_authorization());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::UserHasDependentRecords.is_conflict());
        assert!(DomainError::RutAlreadyExists.is_conflict());
        assert!(!DomainError::TenantMismatch.is_conflict());
    }

    #[test]
    fn test_tenant_error_is_validation() {
        let err: DomainError = crate::value_objects::TenantId::new(0).unwrap_err().into();
        assert!(err.is_validation());
        assert_eq!(err.code(), "INVALID_TENANT_ID");
    }
}
