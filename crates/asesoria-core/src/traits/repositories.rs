//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every cotizacion/comentario method takes the
//! resolved tenant so isolation cannot be skipped at a call site.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{Comentario, Cotizacion, Identity, Role, User};
use crate::error::DomainError;
use crate::value_objects::{EstadoCotizacion, TenantId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Fields for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub rut: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role_id: Option<i64>,
    pub is_active: bool,
    pub email_verified: bool,
    pub email_verification_token: Option<String>,
}

/// Partial update of a user's profile fields
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role_id: Option<i64>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Load user joined with role name and permissions
    async fn find_identity(&self, id: i64) -> RepoResult<Option<Identity>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if RUT is already taken
    async fn rut_exists(&self, rut: &str) -> RepoResult<bool>;

    /// Create a new user, returning the stored row
    async fn create(&self, user: NewUser) -> RepoResult<User>;

    /// Update profile fields
    async fn update(&self, id: i64, update: UserUpdate) -> RepoResult<User>;

    /// Hard delete a user. Callers must check for dependent records first.
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// List users, newest first
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>>;

    /// Total user count
    async fn count(&self) -> RepoResult<i64>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Replace the password hash
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()>;

    /// Toggle the active flag
    async fn set_active(&self, id: i64, is_active: bool) -> RepoResult<()>;

    /// Stamp last_login with the current time
    async fn mark_last_login(&self, id: i64) -> RepoResult<()>;

    /// Find the user holding an email verification token
    async fn find_by_verification_token(&self, token: &str) -> RepoResult<Option<User>>;

    /// Mark email verified and clear the verification token
    async fn mark_email_verified(&self, id: i64) -> RepoResult<()>;

    /// Store a password reset token with its expiry
    async fn set_password_reset(
        &self,
        id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Find the user holding a non-expired reset token
    async fn find_by_reset_token(&self, token: &str) -> RepoResult<Option<i64>>;

    /// Replace the password and clear reset tokens in one statement
    async fn reset_password(&self, id: i64, password_hash: &str) -> RepoResult<()>;

    /// Emails of active admin users, for quote notifications
    async fn list_admin_emails(&self) -> RepoResult<Vec<String>>;
}

// ============================================================================
// Role Repository
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Role>>;

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>>;

    async fn list(&self) -> RepoResult<Vec<Role>>;
}

// ============================================================================
// Refresh Token Ledger
// ============================================================================

/// Row returned by an atomic refresh-token redemption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemedRefreshToken {
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a newly issued token
    async fn insert(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Atomically delete the token row and return it if it existed.
    ///
    /// This must be a single delete-returning statement so that two
    /// concurrent redemptions of the same token can never both observe it;
    /// the loser sees no row. An expired row is still deleted (cleanup) and
    /// reported with its past expiry for the caller to reject.
    async fn redeem(&self, token: &str) -> RepoResult<Option<RedeemedRefreshToken>>;

    /// Delete every token belonging to a user, returning the count
    async fn delete_all_for_user(&self, user_id: i64) -> RepoResult<u64>;

    /// Delete all expired tokens, returning the count
    async fn delete_expired(&self) -> RepoResult<u64>;
}

// ============================================================================
// Cotizacion Repository
// ============================================================================

/// Fields for creating a cotizacion
#[derive(Debug, Clone)]
pub struct NewCotizacion {
    pub cotizacion_ref: String,
    pub nombre: String,
    pub apellidos: String,
    pub edad: Option<i32>,
    pub telefono: String,
    pub email: String,
    pub isapre: String,
    pub valor_mensual: i64,
    pub clinica: String,
    pub renta: i64,
    pub numero_cargas: i32,
    pub edades_cargas: String,
    pub mensaje: String,
    pub procedencia: String,
    pub tipo_ingreso: String,
    pub propietario: TenantId,
}

/// Validated list filters, mapped to a parameterized query by the
/// infrastructure layer.
#[derive(Debug, Clone, Default)]
pub struct CotizacionFilter {
    /// Matches nombre, apellidos, email or the public reference
    pub search: Option<String>,
    pub estado: Option<EstadoCotizacion>,
    pub isapre: Option<String>,
    pub clinica: Option<String>,
    pub procedencia: Option<String>,
    pub tipo_ingreso: Option<String>,
    pub fecha_desde: Option<NaiveDate>,
    pub fecha_hasta: Option<NaiveDate>,
}

/// Partial update of a cotizacion
#[derive(Debug, Clone, Default)]
pub struct CotizacionUpdate {
    pub nombre: Option<String>,
    pub apellidos: Option<String>,
    pub edad: Option<i32>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub isapre: Option<String>,
    pub valor_mensual: Option<i64>,
    pub clinica: Option<String>,
    pub renta: Option<i64>,
    pub numero_cargas: Option<i32>,
    pub edades_cargas: Option<String>,
    pub mensaje: Option<String>,
    pub procedencia: Option<String>,
    pub tipo_ingreso: Option<String>,
    pub estado: Option<EstadoCotizacion>,
}

impl CotizacionUpdate {
    /// True when no field is set; such updates are rejected at the boundary
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.apellidos.is_none()
            && self.edad.is_none()
            && self.telefono.is_none()
            && self.email.is_none()
            && self.isapre.is_none()
            && self.valor_mensual.is_none()
            && self.clinica.is_none()
            && self.renta.is_none()
            && self.numero_cargas.is_none()
            && self.edades_cargas.is_none()
            && self.mensaje.is_none()
            && self.procedencia.is_none()
            && self.tipo_ingreso.is_none()
            && self.estado.is_none()
    }
}

#[async_trait]
pub trait CotizacionRepository: Send + Sync {
    async fn create(&self, cotizacion: NewCotizacion) -> RepoResult<Cotizacion>;

    async fn find_by_id(&self, id: i64, tenant: TenantId) -> RepoResult<Option<Cotizacion>>;

    /// Public status lookup by the COT-... reference
    async fn find_by_ref(
        &self,
        cotizacion_ref: &str,
        tenant: TenantId,
    ) -> RepoResult<Option<Cotizacion>>;

    async fn list(
        &self,
        tenant: TenantId,
        filter: &CotizacionFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Cotizacion>>;

    async fn count(&self, tenant: TenantId, filter: &CotizacionFilter) -> RepoResult<i64>;

    /// Per-estado counts for the tenant's dashboard
    async fn estado_counts(&self, tenant: TenantId)
        -> RepoResult<Vec<(EstadoCotizacion, i64)>>;

    async fn update(
        &self,
        id: i64,
        tenant: TenantId,
        update: CotizacionUpdate,
    ) -> RepoResult<Cotizacion>;

    async fn update_estado(
        &self,
        id: i64,
        tenant: TenantId,
        estado: EstadoCotizacion,
    ) -> RepoResult<Cotizacion>;

    async fn delete(&self, id: i64, tenant: TenantId) -> RepoResult<()>;

    /// Number of cotizaciones stamped with this tenant; used as the
    /// dependent-records guard before user deletion
    async fn count_by_tenant(&self, tenant: TenantId) -> RepoResult<i64>;
}

// ============================================================================
// Comentario Repository
// ============================================================================

/// Fields for creating a comentario
#[derive(Debug, Clone)]
pub struct NewComentario {
    pub nombre: String,
    pub estrellas: i16,
    pub comentario: String,
    pub ver: bool,
    pub propietario: TenantId,
}

/// Admin list filters
#[derive(Debug, Clone, Default)]
pub struct ComentarioFilter {
    pub search: Option<String>,
    pub ver: Option<bool>,
    pub estrellas: Option<i16>,
}

/// Partial update of a comentario
#[derive(Debug, Clone, Default)]
pub struct ComentarioUpdate {
    pub nombre: Option<String>,
    pub estrellas: Option<i16>,
    pub comentario: Option<String>,
    pub ver: Option<bool>,
}

impl ComentarioUpdate {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.estrellas.is_none()
            && self.comentario.is_none()
            && self.ver.is_none()
    }
}

#[async_trait]
pub trait ComentarioRepository: Send + Sync {
    async fn create(&self, comentario: NewComentario) -> RepoResult<Comentario>;

    async fn find_by_id(&self, id: i64, tenant: TenantId) -> RepoResult<Option<Comentario>>;

    async fn list(
        &self,
        tenant: TenantId,
        filter: &ComentarioFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Comentario>>;

    async fn count(&self, tenant: TenantId, filter: &ComentarioFilter) -> RepoResult<i64>;

    /// Approved comments only, newest first
    async fn list_public(
        &self,
        tenant: TenantId,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Comentario>>;

    async fn count_public(&self, tenant: TenantId) -> RepoResult<i64>;

    /// Average star rating across approved comments
    async fn average_stars_public(&self, tenant: TenantId) -> RepoResult<Option<f64>>;

    async fn update(
        &self,
        id: i64,
        tenant: TenantId,
        update: ComentarioUpdate,
    ) -> RepoResult<Comentario>;

    async fn set_visibility(&self, id: i64, tenant: TenantId, ver: bool)
        -> RepoResult<Comentario>;

    async fn delete(&self, id: i64, tenant: TenantId) -> RepoResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cotizacion_update_is_empty() {
        assert!(CotizacionUpdate::default().is_empty());

        let update = CotizacionUpdate {
            estado: Some(EstadoCotizacion::Contactado),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_comentario_update_is_empty() {
        assert!(ComentarioUpdate::default().is_empty());
        assert!(!ComentarioUpdate {
            ver: Some(true),
            ..Default::default()
        }
        .is_empty());
    }
}
