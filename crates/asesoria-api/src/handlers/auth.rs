//! Authentication handlers
//!
//! Registration, login, token refresh, logout, email verification, the
//! password reset flow, and the authenticated profile.

use axum::{extract::Query, extract::State, Json};
use asesoria_service::{
    AuthResponse, AuthService, ForgotPasswordRequest, LoginRequest, ProfileResponse,
    RefreshTokenRequest, RegisterRequest, RegisteredResponse, ResetPasswordRequest,
    TokensResponse,
};
use serde::Deserialize;

use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, ApiSuccess, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<RegisteredResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(ApiSuccess::new(
        "Usuario registrado exitosamente. Por favor verifica tu email.",
        response,
    )))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<ApiSuccess<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(ApiSuccess::new("Inicio de sesion exitoso", response))
}

/// Rotate the refresh token
///
/// POST /api/auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<ApiSuccess<TokensResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(ApiSuccess::new("Tokens refrescados exitosamente", response))
}

/// Logout: revokes every session of the authenticated user
///
/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> ApiResult<ApiSuccess<()>> {
    let service = AuthService::new(state.service_context());
    service.logout(identity.user_id).await?;
    Ok(ApiSuccess::message("Sesion cerrada exitosamente"))
}

/// Email verification query parameters
#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: Option<String>,
}

/// Confirm an email verification token
///
/// GET /api/auth/verify-email?token=...
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> ApiResult<ApiSuccess<RegisteredResponse>> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::invalid_query("Token de verificacion requerido"))?;

    let service = AuthService::new(state.service_context());
    let response = service.verify_email(&token).await?;
    Ok(ApiSuccess::new("Email verificado exitosamente", response))
}

/// Start the password reset flow. The answer is the same whether or not
/// the email exists.
///
/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> ApiResult<ApiSuccess<()>> {
    let service = AuthService::new(state.service_context());
    service.forgot_password(request).await?;
    Ok(ApiSuccess::message(
        "Si el email existe, recibiras un enlace para restablecer tu contrasena",
    ))
}

/// Complete the password reset flow
///
/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<ApiSuccess<()>> {
    let service = AuthService::new(state.service_context());
    service.reset_password(request).await?;
    Ok(ApiSuccess::message("Contrasena restablecida exitosamente"))
}

/// Profile of the authenticated user
///
/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> ApiResult<ApiSuccess<ProfileResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.profile(identity.user_id).await?;
    Ok(ApiSuccess::new("Perfil obtenido", response))
}
