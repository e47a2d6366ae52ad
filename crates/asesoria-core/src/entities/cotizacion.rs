//! Cotizacion entity - a quote request submitted through the public form
//! or created from the admin panel

use chrono::{DateTime, Utc};

use crate::value_objects::{EstadoCotizacion, TenantId};

/// A health-insurance quote request.
///
/// `cotizacion_ref` is the public reference (`COT-YYYYMMDD-NNNNNN`) handed
/// to the submitter for status lookups; `id` stays internal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cotizacion {
    pub id: i64,
    pub cotizacion_ref: String,
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
    pub propietario: TenantId,
    pub fecha_envio: DateTime<Utc>,
}

/// Build the public reference for a new cotizacion: submission date plus the
/// last six digits of the millisecond timestamp.
pub fn generate_cotizacion_ref(now: DateTime<Utc>) -> String {
    format!(
        "COT-{}-{:06}",
        now.format("%Y%m%d"),
        now.timestamp_millis().rem_euclid(1_000_000)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ref_format() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
        let reference = generate_cotizacion_ref(now);
        assert!(reference.starts_with("COT-20250314-"));
        assert_eq!(reference.len(), "COT-20250314-".len() + 6);
    }

    #[test]
    fn test_ref_suffix_is_six_digits() {
        let reference = generate_cotizacion_ref(Utc::now());
        let suffix = reference.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }
}
