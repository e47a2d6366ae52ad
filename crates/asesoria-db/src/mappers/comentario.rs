//! Comentario model mapper

use asesoria_core::entities::Comentario;
use asesoria_core::value_objects::TenantId;
use asesoria_core::DomainError;

use crate::models::ComentarioModel;

impl TryFrom<ComentarioModel> for Comentario {
    type Error = DomainError;

    fn try_from(model: ComentarioModel) -> Result<Self, Self::Error> {
        Ok(Comentario {
            id: model.id,
            nombre: model.nombre,
            estrellas: model.estrellas,
            comentario: model.comentario,
            ver: model.ver,
            propietario: TenantId::new(model.id_propietario)?,
            fecha_creacion: model.fecha_creacion,
            fecha_actualizacion: model.fecha_actualizacion,
        })
    }
}
