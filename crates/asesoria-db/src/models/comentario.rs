//! Comentario database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the comentarios table
#[derive(Debug, Clone, FromRow)]
pub struct ComentarioModel {
    pub id: i64,
    pub nombre: String,
    pub estrellas: i16,
    pub comentario: String,
    pub ver: bool,
    pub id_propietario: i64,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}
