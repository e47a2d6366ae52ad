//! Cotizacion database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the cotizacion table
#[derive(Debug, Clone, FromRow)]
pub struct CotizacionModel {
    pub id: i64,
    /// Public COT-... reference (column name kept from the legacy schema)
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
    pub estado: String,
    pub id_propietario: i64,
    pub fecha_envio: DateTime<Utc>,
}
