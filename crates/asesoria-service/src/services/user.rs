//! User management service (admin panel)

use asesoria_common::auth::hash_password;
use asesoria_core::traits::{NewUser, UserUpdate};
use asesoria_core::value_objects::TenantId;
use asesoria_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    CreateUserRequest, PaginationMeta, RoleResponse, UpdateUserRequest, UserListResponse,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

/// User management service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List users, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, page: i64, limit: i64) -> ServiceResult<UserListResponse> {
        let offset = (page - 1) * limit;
        let users = self.ctx.user_repo().list(limit, offset).await?;
        let total = self.ctx.user_repo().count().await?;

        Ok(UserListResponse {
            users: users.iter().map(UserResponse::from).collect(),
            pagination: PaginationMeta::new(page, limit, total),
        })
    }

    /// Fetch a single user
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id.to_string()))?;

        Ok(UserResponse::from(&user))
    }

    /// Create a user from the admin panel. The account is created already
    /// email-verified; the administrator vouches for the address.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().rut_exists(&request.rut).await? {
            return Err(DomainError::RutAlreadyExists.into());
        }
        if let Some(role_id) = request.role_id {
            self.ctx
                .role_repo()
                .find_by_id(role_id)
                .await?
                .ok_or(DomainError::RoleNotFound(role_id))?;
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user = self
            .ctx
            .user_repo()
            .create(NewUser {
                rut: request.rut,
                email: request.email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
                phone: request.phone,
                role_id: request.role_id,
                is_active: request.is_active.unwrap_or(true),
                email_verified: true,
                email_verification_token: None,
            })
            .await?;

        info!(user_id = user.id, "User created by admin");
        Ok(UserResponse::from(&user))
    }

    /// Update profile fields
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .update(
                id,
                UserUpdate {
                    first_name: request.first_name,
                    last_name: request.last_name,
                    phone: request.phone,
                    role_id: request.role_id,
                },
            )
            .await?;

        Ok(UserResponse::from(&user))
    }

    /// Delete a user. Refused while the user owns cotizaciones, since those
    /// records would be orphaned.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id.to_string()))?;

        let owned = match TenantId::new(id) {
            Ok(tenant) => self.ctx.cotizacion_repo().count_by_tenant(tenant).await?,
            Err(_) => 0,
        };
        if owned > 0 {
            return Err(DomainError::UserHasDependentRecords.into());
        }

        SessionService::new(self.ctx).revoke_all_sessions(id).await?;
        self.ctx.user_repo().delete(id).await?;

        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Toggle the active flag. Deactivation also revokes every session so
    /// the account loses access as soon as its access token expires.
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: i64, is_active: bool) -> ServiceResult<()> {
        self.ctx.user_repo().set_active(id, is_active).await?;

        if !is_active {
            SessionService::new(self.ctx).revoke_all_sessions(id).await?;
        }

        info!(user_id = id, is_active, "User active flag changed");
        Ok(())
    }

    /// List all roles
    #[instrument(skip(self))]
    pub async fn roles(&self) -> ServiceResult<Vec<RoleResponse>> {
        let roles = self.ctx.role_repo().list().await?;
        Ok(roles.iter().map(RoleResponse::from).collect())
    }
}
