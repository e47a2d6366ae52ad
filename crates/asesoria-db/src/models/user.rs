//! User database models

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
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
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape for a user joined with its role, as loaded by the
/// authorization gate
#[derive(Debug, Clone, FromRow)]
pub struct IdentityModel {
    pub id: i64,
    pub rut: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_name: Option<String>,
    /// JSONB permission array; NULL when the user has no role
    pub permissions: Option<Json<Vec<String>>>,
}
