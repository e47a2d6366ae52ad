//! Cotizacion model mapper

use asesoria_core::entities::Cotizacion;
use asesoria_core::value_objects::TenantId;
use asesoria_core::DomainError;

use crate::models::CotizacionModel;

impl TryFrom<CotizacionModel> for Cotizacion {
    type Error = DomainError;

    fn try_from(model: CotizacionModel) -> Result<Self, Self::Error> {
        Ok(Cotizacion {
            id: model.id,
            cotizacion_ref: model.cotizacion_id,
            nombre: model.nombre,
            apellidos: model.apellidos,
            edad: model.edad,
            telefono: model.telefono,
            email: model.email,
            isapre: model.isapre,
            valor_mensual: model.valor_mensual,
            clinica: model.clinica,
            renta: model.renta,
            numero_cargas: model.numero_cargas,
            edades_cargas: model.edades_cargas,
            mensaje: model.mensaje,
            procedencia: model.procedencia,
            tipo_ingreso: model.tipo_ingreso,
            estado: model.estado.parse()?,
            propietario: TenantId::new(model.id_propietario)?,
            fecha_envio: model.fecha_envio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model() -> CotizacionModel {
        CotizacionModel {
            id: 1,
            cotizacion_id: "COT-20250314-000042".to_string(),
            nombre: "Maria".to_string(),
            apellidos: "Gonzalez".to_string(),
            edad: Some(34),
            telefono: "+56 9 1234 5678".to_string(),
            email: "maria@example.com".to_string(),
            isapre: "Colmena".to_string(),
            valor_mensual: 85000,
            clinica: "Santa Maria".to_string(),
            renta: 1_500_000,
            numero_cargas: 2,
            edades_cargas: "5, 8".to_string(),
            mensaje: String::new(),
            procedencia: "google".to_string(),
            tipo_ingreso: "dependiente".to_string(),
            estado: "en_revision".to_string(),
            id_propietario: 3,
            fecha_envio: Utc::now(),
        }
    }

    #[test]
    fn test_maps_estado_and_tenant() {
        let cotizacion = Cotizacion::try_from(model()).unwrap();
        assert_eq!(
            cotizacion.estado,
            asesoria_core::EstadoCotizacion::EnRevision
        );
        assert_eq!(cotizacion.propietario.into_inner(), 3);
        assert_eq!(cotizacion.cotizacion_ref, "COT-20250314-000042");
    }

    #[test]
    fn test_rejects_unknown_estado() {
        let mut bad = model();
        bad.estado = "archivado".to_string();
        assert!(Cotizacion::try_from(bad).is_err());
    }
}
