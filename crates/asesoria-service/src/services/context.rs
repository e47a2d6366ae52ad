//! Service context - dependency container for services
//!
//! Holds all repositories, the JWT service, and the (optional) mailer.
//! Everything is constructed once at process start and injected; no
//! module-level singletons.

use std::sync::Arc;

use asesoria_common::auth::JwtService;
use asesoria_core::traits::{
    ComentarioRepository, CotizacionRepository, RefreshTokenRepository, RoleRepository,
    UserRepository,
};
use asesoria_db::PgPool;
use asesoria_mailer::Mailer;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    role_repo: Arc<dyn RoleRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    cotizacion_repo: Arc<dyn CotizacionRepository>,
    comentario_repo: Arc<dyn ComentarioRepository>,

    // Services
    jwt_service: Arc<JwtService>,

    // Outbound email; None disables delivery entirely
    mailer: Option<Mailer>,

    // Refresh-token lifetime in seconds
    refresh_token_expiry: i64,
}

impl ServiceContext {
    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the role repository
    pub fn role_repo(&self) -> &dyn RoleRepository {
        self.role_repo.as_ref()
    }

    /// Get the refresh token ledger
    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    /// Get the cotizacion repository
    pub fn cotizacion_repo(&self) -> &dyn CotizacionRepository {
        self.cotizacion_repo.as_ref()
    }

    /// Get the comentario repository
    pub fn comentario_repo(&self) -> &dyn ComentarioRepository {
        self.comentario_repo.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the mailer, if outbound email is configured
    pub fn mailer(&self) -> Option<&Mailer> {
        self.mailer.as_ref()
    }

    /// Refresh-token lifetime in seconds
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("mailer", &self.mailer.is_some())
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    role_repo: Option<Arc<dyn RoleRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    cotizacion_repo: Option<Arc<dyn CotizacionRepository>>,
    comentario_repo: Option<Arc<dyn ComentarioRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    mailer: Option<Mailer>,
    refresh_token_expiry: i64,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            role_repo: None,
            refresh_token_repo: None,
            cotizacion_repo: None,
            comentario_repo: None,
            jwt_service: None,
            mailer: None,
            refresh_token_expiry: 604_800,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn RoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    pub fn cotizacion_repo(mut self, repo: Arc<dyn CotizacionRepository>) -> Self {
        self.cotizacion_repo = Some(repo);
        self
    }

    pub fn comentario_repo(mut self, repo: Arc<dyn ComentarioRepository>) -> Self {
        self.comentario_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn mailer(mut self, mailer: Option<Mailer>) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn refresh_token_expiry(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext {
            pool: self
                .pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            role_repo: self
                .role_repo
                .ok_or_else(|| ServiceError::validation("role_repo is required"))?,
            refresh_token_repo: self
                .refresh_token_repo
                .ok_or_else(|| ServiceError::validation("refresh_token_repo is required"))?,
            cotizacion_repo: self
                .cotizacion_repo
                .ok_or_else(|| ServiceError::validation("cotizacion_repo is required"))?,
            comentario_repo: self
                .comentario_repo
                .ok_or_else(|| ServiceError::validation("comentario_repo is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            mailer: self.mailer,
            refresh_token_expiry: self.refresh_token_expiry,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
