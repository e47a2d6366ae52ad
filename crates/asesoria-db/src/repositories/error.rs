//! Error handling utilities for repositories

use asesoria_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: i64) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "cotizacion not found" error
pub fn cotizacion_not_found(id: i64) -> DomainError {
    DomainError::CotizacionNotFound(id)
}

/// Create a "comentario not found" error
pub fn comentario_not_found(id: i64) -> DomainError {
    DomainError::ComentarioNotFound(id)
}
