//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Uniqueness combines
//! a process-wide counter with a time-derived seed so repeated runs against
//! the same database do not collide on unique columns.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(1);
static SEED: OnceLock<u64> = OnceLock::new();

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    let seed = *SEED.get_or_init(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
            % 1_000_000_000
    });
    seed + COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub rut: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            rut: format!("{:02}.{:03}.{:03}-{}", 10 + suffix % 90, suffix % 1000, (suffix / 7) % 1000, suffix % 10),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Prueba".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Refresh token request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Registration outcome payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredResponse {
    pub id: i64,
    pub email: String,
}

/// Token pair payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login payload: user plus tokens
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: CurrentUserResponse,
    pub tokens: TokensResponse,
}

/// Authenticated user summary
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: i64,
    pub email: String,
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

/// Public quote form submission
#[derive(Debug, Serialize)]
pub struct CreateCotizacionRequest {
    pub nombre: String,
    pub apellidos: String,
    pub telefono: String,
    pub email: String,
    pub isapre: String,
    pub clinica: String,
    pub renta: i64,
}

impl CreateCotizacionRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            nombre: format!("Visitante {suffix}"),
            apellidos: "De Prueba".to_string(),
            telefono: "+56 9 1234 5678".to_string(),
            email: format!("visitante{suffix}@example.com"),
            isapre: "Colmena".to_string(),
            clinica: "Santa Maria".to_string(),
            renta: 1_200_000,
        }
    }
}

/// Cotizacion payload
#[derive(Debug, Deserialize)]
pub struct CotizacionResponse {
    pub id: i64,
    pub cotizacion_id: String,
    pub nombre: String,
    pub estado: String,
    pub id_propietario: i64,
}

/// Public status lookup payload
#[derive(Debug, Deserialize)]
pub struct CotizacionEstadoResponse {
    pub cotizacion_id: String,
    pub nombre: String,
    pub estado: String,
}

/// Admin listing payload
#[derive(Debug, Deserialize)]
pub struct CotizacionListResponse {
    pub cotizaciones: Vec<CotizacionResponse>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Public testimonial submission
#[derive(Debug, Serialize)]
pub struct CreateComentarioRequest {
    pub nombre: String,
    pub estrellas: i16,
    pub comentario: String,
}

impl CreateComentarioRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            nombre: format!("Cliente {suffix}"),
            estrellas: 5,
            comentario: "Excelente atencion, muy recomendada la asesoria.".to_string(),
        }
    }
}

/// Public testimonial payload
#[derive(Debug, Deserialize)]
pub struct ComentarioPublicoResponse {
    pub id: i64,
    pub nombre: String,
    pub estrellas: i16,
}

/// Public testimonial listing payload
#[derive(Debug, Deserialize)]
pub struct ComentariosPublicosResponse {
    pub comentarios: Vec<ComentarioPublicoResponse>,
    pub pagination: PaginationMeta,
}
