//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names
//! follow the wire contract of the admin panel (snake_case for record data,
//! camelCase for auth/user payloads).

use asesoria_core::value_objects::EstadoCotizacion;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page/limit pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: if limit > 0 {
                (total + limit - 1) / limit
            } else {
                0
            },
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Token pair handed out on login and refresh
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl TokensResponse {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Authenticated user summary included in the login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: i64,
    pub email: String,
    pub rut: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

/// Login response: user plus tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: CurrentUserResponse,
    pub tokens: TokensResponse,
}

/// Registration outcome (no tokens; email must be verified first)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Full profile of the authenticated user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub rut: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

// ============================================================================
// User Responses
// ============================================================================

/// Admin view of a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
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
}

/// Paginated user listing
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PaginationMeta,
}

/// Role reference data
#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
}

// ============================================================================
// Cotizacion Responses
// ============================================================================

/// Full cotizacion record as seen by the admin panel
#[derive(Debug, Clone, Serialize)]
pub struct CotizacionResponse {
    pub id: i64,
    pub cotizacion_id: String,
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
    pub estado: EstadoCotizacion,
    pub id_propietario: i64,
    pub fecha_envio: DateTime<Utc>,
}

/// Per-estado counts for the tenant's records
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListStats {
    pub total: i64,
    pub pendientes: i64,
    pub en_revision: i64,
    pub contactados: i64,
    pub cliente_ingresado: i64,
    pub nunca_respondio: i64,
    pub cotizados: i64,
    pub cerrados: i64,
}

impl ListStats {
    /// Build from grouped estado counts
    pub fn from_counts(counts: &[(EstadoCotizacion, i64)]) -> Self {
        let mut stats = Self::default();
        for (estado, count) in counts {
            stats.total += count;
            match estado {
                EstadoCotizacion::Pendiente => stats.pendientes = *count,
                EstadoCotizacion::EnRevision => stats.en_revision = *count,
                EstadoCotizacion::Contactado => stats.contactados = *count,
                EstadoCotizacion::ClienteIngresado => stats.cliente_ingresado = *count,
                EstadoCotizacion::NuncaRespondio => stats.nunca_respondio = *count,
                EstadoCotizacion::Cotizado => stats.cotizados = *count,
                EstadoCotizacion::Cerrado => stats.cerrados = *count,
            }
        }
        stats
    }
}

/// Paginated admin listing with dashboard stats
#[derive(Debug, Serialize)]
pub struct CotizacionListResponse {
    pub cotizaciones: Vec<CotizacionResponse>,
    pub pagination: PaginationMeta,
    pub stats: ListStats,
}

/// Public status lookup result
#[derive(Debug, Serialize)]
pub struct CotizacionEstadoResponse {
    pub cotizacion_id: String,
    pub nombre: String,
    pub apellidos: String,
    pub estado: EstadoCotizacion,
    pub fecha_envio: DateTime<Utc>,
}

// ============================================================================
// Comentario Responses
// ============================================================================

/// Admin view of a testimonial
#[derive(Debug, Clone, Serialize)]
pub struct ComentarioResponse {
    pub id: i64,
    pub nombre: String,
    pub estrellas: i16,
    pub comentario: String,
    pub ver: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

/// Public view of a testimonial; the visibility flag is implicit
#[derive(Debug, Clone, Serialize)]
pub struct ComentarioPublicoResponse {
    pub id: i64,
    pub nombre: String,
    pub estrellas: i16,
    pub comentario: String,
    pub fecha_creacion: DateTime<Utc>,
}

/// Star-rating aggregate for the public listing
#[derive(Debug, Serialize)]
pub struct ComentarioStats {
    pub promedio_estrellas: f64,
    pub total_comentarios: i64,
}

/// Paginated admin listing
#[derive(Debug, Serialize)]
pub struct ComentarioListResponse {
    pub comentarios: Vec<ComentarioResponse>,
    pub pagination: PaginationMeta,
}

/// Paginated public listing with aggregate rating
#[derive(Debug, Serialize)]
pub struct ComentariosPublicosResponse {
    pub comentarios: Vec<ComentarioPublicoResponse>,
    pub pagination: PaginationMeta,
    pub estadisticas: ComentarioStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_rounds_up() {
        let meta = PaginationMeta::new(1, 10, 25);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::new(1, 10, 30);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn test_list_stats_from_counts() {
        let counts = vec![
            (EstadoCotizacion::Pendiente, 4),
            (EstadoCotizacion::Cerrado, 2),
            (EstadoCotizacion::NuncaRespondio, 1),
        ];
        let stats = ListStats::from_counts(&counts);
        assert_eq!(stats.total, 7);
        assert_eq!(stats.pendientes, 4);
        assert_eq!(stats.cerrados, 2);
        assert_eq!(stats.nunca_respondio, 1);
        assert_eq!(stats.cotizados, 0);
    }
}
