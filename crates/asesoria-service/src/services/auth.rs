//! Authentication service
//!
//! Handles registration, login, token refresh, logout, email verification,
//! and the password reset flow. Also the authorization gate's entry point:
//! [`AuthService::authenticate`] turns a bearer token into an [`Identity`].

use asesoria_common::auth::{
    generate_opaque_token, hash_password, validate_password_strength, verify_password,
};
use asesoria_common::AppError;
use asesoria_core::entities::Identity;
use asesoria_core::traits::NewUser;
use asesoria_core::DomainError;
use asesoria_mailer::EmailTemplate;
use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, ProfileResponse, RefreshTokenRequest,
    RegisterRequest, RegisteredResponse, ResetPasswordRequest, TokensResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

/// Reset tokens stay valid for one hour
const PASSWORD_RESET_VALIDITY_HOURS: i64 = 1;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn sessions(&self) -> SessionService<'a> {
        SessionService::new(self.ctx)
    }

    /// Register a new user. The account starts unverified; a verification
    /// email is dispatched best-effort.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisteredResponse> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().rut_exists(&request.rut).await? {
            return Err(DomainError::RutAlreadyExists.into());
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;
        let verification_token = generate_opaque_token();

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
                is_active: true,
                email_verified: false,
                email_verification_token: Some(verification_token.clone()),
            })
            .await?;

        info!(user_id = user.id, "User registered");

        if let Some(mailer) = self.ctx.mailer() {
            mailer.spawn_send(
                user.email.clone(),
                EmailTemplate::Verification {
                    first_name: &user.first_name,
                    token: &verification_token,
                },
            );
        }

        Ok(RegisteredResponse {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        })
    }

    /// Login with email and password.
    ///
    /// The account state is checked before the password so that inactive or
    /// unverified accounts cannot log in even with correct credentials.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !user.is_active {
            warn!(user_id = user.id, "Login rejected: account inactive");
            return Err(ServiceError::App(AppError::AccountInactive));
        }
        if !user.email_verified {
            warn!(user_id = user.id, "Login rejected: email not verified");
            return Err(ServiceError::App(AppError::EmailNotVerified));
        }

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;
        if !is_valid {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let tokens = self.sessions().issue_session(user.id).await?;
        self.ctx.user_repo().mark_last_login(user.id).await?;

        let identity = self
            .ctx
            .user_repo()
            .find_identity(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::UnknownUser))?;

        info!(user_id = user.id, "User logged in");

        Ok(AuthResponse {
            user: (&identity).into(),
            tokens: TokensResponse::new(
                tokens.access_token,
                tokens.refresh_token,
                tokens.expires_in,
            ),
        })
    }

    /// Rotate a refresh token
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<TokensResponse> {
        let tokens = self.sessions().refresh_session(&request.refresh_token).await?;

        Ok(TokensResponse::new(
            tokens.access_token,
            tokens.refresh_token,
            tokens.expires_in,
        ))
    }

    /// Logout: revoke every refresh token the user holds
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: i64) -> ServiceResult<()> {
        self.sessions().revoke_all_sessions(user_id).await?;
        Ok(())
    }

    /// Turn a bearer access token into a verified, enriched identity.
    ///
    /// Fails distinctly for expiry, bad signature, unknown user, inactive
    /// account, and unverified email.
    #[instrument(skip(self, bearer_token))]
    pub async fn authenticate(&self, bearer_token: &str) -> ServiceResult<Identity> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_access_token(bearer_token)
            .map_err(ServiceError::from)?;
        let user_id = claims.user_id().map_err(ServiceError::from)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::UnknownUser))?;

        if !user.is_active {
            return Err(ServiceError::App(AppError::AccountInactive));
        }
        if !user.email_verified {
            return Err(ServiceError::App(AppError::EmailNotVerified));
        }

        self.ctx
            .user_repo()
            .find_identity(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::UnknownUser))
    }

    /// Confirm an email verification token and activate login for the user
    #[instrument(skip(self, token))]
    pub async fn verify_email(&self, token: &str) -> ServiceResult<RegisteredResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_verification_token(token)
            .await?
            .ok_or_else(|| {
                ServiceError::validation("Token de verificacion invalido o expirado")
            })?;

        self.ctx.user_repo().mark_email_verified(user.id).await?;
        info!(user_id = user.id, "Email verified");

        if let Some(mailer) = self.ctx.mailer() {
            mailer.spawn_send(
                user.email.clone(),
                EmailTemplate::Welcome {
                    first_name: &user.first_name,
                },
            );
        }

        Ok(RegisteredResponse {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        })
    }

    /// Start the password reset flow.
    ///
    /// Always succeeds so callers cannot probe which emails exist; a reset
    /// token is stored and mailed only for active accounts.
    #[instrument(skip(self, request))]
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> ServiceResult<()> {
        let user = self.ctx.user_repo().find_by_email(&request.email).await?;

        let Some(user) = user.filter(|u| u.is_active) else {
            return Ok(());
        };

        let reset_token = generate_opaque_token();
        let expires_at = Utc::now() + Duration::hours(PASSWORD_RESET_VALIDITY_HOURS);

        self.ctx
            .user_repo()
            .set_password_reset(user.id, &reset_token, expires_at)
            .await?;

        if let Some(mailer) = self.ctx.mailer() {
            mailer.spawn_send(
                user.email.clone(),
                EmailTemplate::PasswordReset {
                    first_name: &user.first_name,
                    token: &reset_token,
                },
            );
        }

        info!(user_id = user.id, "Password reset requested");
        Ok(())
    }

    /// Complete the password reset flow. All existing sessions are revoked.
    #[instrument(skip(self, request))]
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> ServiceResult<()> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        let user_id = self
            .ctx
            .user_repo()
            .find_by_reset_token(&request.token)
            .await?
            .ok_or_else(|| ServiceError::validation("Token invalido o expirado"))?;

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        self.ctx
            .user_repo()
            .reset_password(user_id, &password_hash)
            .await?;

        self.sessions().revoke_all_sessions(user_id).await?;
        info!(user_id, "Password reset completed");

        Ok(())
    }

    /// Load the authenticated user's profile
    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: i64) -> ServiceResult<ProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let identity = self
            .ctx
            .user_repo()
            .find_identity(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(ProfileResponse::new(&user, &identity))
    }
}
