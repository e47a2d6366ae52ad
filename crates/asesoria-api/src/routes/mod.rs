//! Route definitions
//!
//! All API routes organized by domain and mounted under /api. Route order
//! matters for the cotizaciones/comentarios groups: the literal segments
//! (`/admin`, `/estado`, `/publicos`) are declared before `/:id`.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{auth, comentarios, cotizaciones, health, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health, which is
/// mounted separately to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(cotizacion_routes())
        .merge(comentario_routes())
        .merge(user_routes())
        .route("/health", get(health::health_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh-token", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/verify-email", get(auth::verify_email))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/auth/profile", get(auth::profile))
}

/// Cotizacion routes (public intake + tenant-scoped admin CRUD)
fn cotizacion_routes() -> Router<AppState> {
    Router::new()
        .route("/cotizaciones", post(cotizaciones::crear))
        .route("/cotizaciones", get(cotizaciones::listar))
        .route("/cotizaciones/admin", post(cotizaciones::crear_admin))
        .route(
            "/cotizaciones/estado/:cotizacion_id",
            get(cotizaciones::consultar_estado),
        )
        .route("/cotizaciones/:id", get(cotizaciones::obtener))
        .route("/cotizaciones/:id", put(cotizaciones::actualizar))
        .route("/cotizaciones/:id", delete(cotizaciones::eliminar))
        .route(
            "/cotizaciones/:id/estado",
            patch(cotizaciones::actualizar_estado),
        )
}

/// Comentario routes (public intake + tenant-scoped admin moderation)
fn comentario_routes() -> Router<AppState> {
    Router::new()
        .route("/comentarios", post(comentarios::crear))
        .route("/comentarios", get(comentarios::listar))
        .route("/comentarios/publicos", get(comentarios::listar_publicos))
        .route("/comentarios/admin", post(comentarios::crear_admin))
        .route("/comentarios/:id", get(comentarios::obtener))
        .route("/comentarios/:id", put(comentarios::actualizar))
        .route("/comentarios/:id", delete(comentarios::eliminar))
        .route(
            "/comentarios/:id/visibilidad",
            patch(comentarios::cambiar_visibilidad),
        )
}

/// User management routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::listar))
        .route("/users", post(users::crear))
        .route("/users/roles", get(users::listar_roles))
        .route("/users/:id", get(users::obtener))
        .route("/users/:id", put(users::actualizar))
        .route("/users/:id", delete(users::eliminar))
        .route("/users/:id/active", patch(users::cambiar_activo))
}
