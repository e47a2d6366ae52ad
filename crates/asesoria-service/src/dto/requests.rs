//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those accepted through
//! `ValidatedJson` also implement `Validate`. Validation bounds follow the
//! public form contract.

use asesoria_core::value_objects::EstadoCotizacion;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 9, max = 12, message = "El RUT debe tener entre 9 y 12 caracteres"))]
    pub rut: String,

    #[validate(email(message = "Email invalido"))]
    pub email: String,

    /// Strength rules (upper/lower/digit) are enforced by the service
    #[validate(length(min = 8, max = 72, message = "La contrasena debe tener al menos 8 caracteres"))]
    pub password: String,

    #[validate(length(min = 2, max = 50, message = "El nombre debe tener entre 2 y 50 caracteres"))]
    pub first_name: String,

    #[validate(length(min = 2, max = 50, message = "El apellido debe tener entre 2 y 50 caracteres"))]
    pub last_name: String,

    pub phone: Option<String>,

    pub role_id: Option<i64>,
}

/// User login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Forgot-password request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Email invalido"))]
    pub email: String,
}

/// Password reset request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,

    #[validate(length(min = 8, max = 72, message = "La contrasena debe tener al menos 8 caracteres"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Las contrasenas no coinciden"))]
    pub confirm_password: String,
}

// ============================================================================
// Cotizacion Requests
// ============================================================================

/// Quote form submission. The public endpoint requires an email; the admin
/// creation endpoint relaxes it. Everything else defaults to empty/zero.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCotizacionRequest {
    #[validate(length(min = 2, max = 150, message = "El nombre debe tener entre 2 y 150 caracteres"))]
    pub nombre: String,

    pub apellidos: Option<String>,

    pub edad: Option<i32>,

    pub telefono: Option<String>,

    #[validate(email(message = "El formato del email no es valido"))]
    pub email: Option<String>,

    pub isapre: Option<String>,

    pub valor_mensual: Option<i64>,

    pub clinica: Option<String>,

    pub renta: Option<i64>,

    pub numero_cargas: Option<i32>,

    #[validate(length(max = 100, message = "Las edades de cargas no pueden exceder 100 caracteres"))]
    pub edades_cargas: Option<String>,

    #[validate(length(max = 1000, message = "El mensaje no puede exceder 1000 caracteres"))]
    pub mensaje: Option<String>,

    #[validate(length(max = 255, message = "La procedencia no puede exceder 255 caracteres"))]
    pub procedencia: Option<String>,

    #[validate(length(max = 100, message = "El tipo de ingreso no puede exceder 100 caracteres"))]
    pub tipo_ingreso: Option<String>,

    /// Tenant stamp fallback for write verbs without header/query
    pub propietario_id: Option<i64>,
}

/// Partial cotizacion update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCotizacionRequest {
    #[validate(length(min = 2, max = 150, message = "El nombre debe tener entre 2 y 150 caracteres"))]
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

    #[validate(length(max = 100, message = "Las edades de cargas no pueden exceder 100 caracteres"))]
    pub edades_cargas: Option<String>,

    #[validate(length(max = 1000, message = "El mensaje no puede exceder 1000 caracteres"))]
    pub mensaje: Option<String>,

    #[validate(length(max = 255, message = "La procedencia no puede exceder 255 caracteres"))]
    pub procedencia: Option<String>,

    #[validate(length(max = 100, message = "El tipo de ingreso no puede exceder 100 caracteres"))]
    pub tipo_ingreso: Option<String>,

    /// Unknown labels are rejected at deserialization
    pub estado: Option<EstadoCotizacion>,

    pub propietario_id: Option<i64>,
}

/// Estado-only update
#[derive(Debug, Clone, Deserialize)]
pub struct EstadoUpdateRequest {
    pub estado: EstadoCotizacion,
    pub propietario_id: Option<i64>,
}

/// Admin list filters for cotizaciones
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CotizacionQuery {
    pub search: Option<String>,
    pub estado: Option<EstadoCotizacion>,
    pub isapre: Option<String>,
    pub clinica: Option<String>,
    pub procedencia: Option<String>,
    pub tipo_ingreso: Option<String>,
    #[serde(rename = "fechaDesde")]
    pub fecha_desde: Option<NaiveDate>,
    #[serde(rename = "fechaHasta")]
    pub fecha_hasta: Option<NaiveDate>,
}

// ============================================================================
// Comentario Requests
// ============================================================================

/// Public testimonial submission; always created hidden
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComentarioRequest {
    #[validate(length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"))]
    pub nombre: String,

    #[validate(range(min = 1, max = 5, message = "Las estrellas deben ser un numero entre 1 y 5"))]
    pub estrellas: i16,

    #[validate(length(min = 10, max = 1000, message = "El comentario debe tener entre 10 y 1000 caracteres"))]
    pub comentario: String,

    pub propietario_id: Option<i64>,
}

/// Admin testimonial creation; may be created visible and with an empty body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComentarioAdminRequest {
    #[validate(length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"))]
    pub nombre: String,

    #[validate(range(min = 1, max = 5, message = "Las estrellas deben ser un numero entre 1 y 5"))]
    pub estrellas: i16,

    #[validate(length(max = 1000, message = "El comentario no puede exceder 1000 caracteres"))]
    pub comentario: Option<String>,

    pub ver: Option<bool>,

    pub propietario_id: Option<i64>,
}

/// Partial testimonial update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateComentarioRequest {
    #[validate(length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"))]
    pub nombre: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Las estrellas deben ser un numero entre 1 y 5"))]
    pub estrellas: Option<i16>,

    #[validate(length(max = 1000, message = "El comentario no puede exceder 1000 caracteres"))]
    pub comentario: Option<String>,

    pub ver: Option<bool>,

    pub propietario_id: Option<i64>,
}

/// Visibility toggle
#[derive(Debug, Clone, Deserialize)]
pub struct VisibilityRequest {
    pub ver: bool,
    pub propietario_id: Option<i64>,
}

/// Admin list filters for comentarios
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComentarioQuery {
    pub search: Option<String>,
    pub ver: Option<bool>,
    pub estrellas: Option<i16>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Admin user creation. Created accounts are email-verified; the admin
/// vouches for the address.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 9, max = 12, message = "El RUT debe tener entre 9 y 12 caracteres"))]
    pub rut: String,

    #[validate(email(message = "Email invalido"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "La contrasena debe tener al menos 8 caracteres"))]
    pub password: String,

    #[validate(length(min = 2, max = 50, message = "El nombre debe tener entre 2 y 50 caracteres"))]
    pub first_name: String,

    #[validate(length(min = 2, max = 50, message = "El apellido debe tener entre 2 y 50 caracteres"))]
    pub last_name: String,

    pub phone: Option<String>,

    pub role_id: Option<i64>,

    pub is_active: Option<bool>,
}

/// Admin user update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 50, message = "El nombre debe tener entre 2 y 50 caracteres"))]
    pub first_name: Option<String>,

    #[validate(length(min = 2, max = 50, message = "El apellido debe tener entre 2 y 50 caracteres"))]
    pub last_name: Option<String>,

    pub phone: Option<String>,

    pub role_id: Option<i64>,
}

/// Active flag toggle
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    pub is_active: bool,
}
