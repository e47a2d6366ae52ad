//! Entity -> response DTO mappers

use asesoria_core::entities::{Comentario, Cotizacion, Identity, Role, User};

use super::responses::{
    ComentarioPublicoResponse, ComentarioResponse, CotizacionEstadoResponse, CotizacionResponse,
    CurrentUserResponse, ProfileResponse, RoleResponse, UserResponse,
};

impl From<&Identity> for CurrentUserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.user_id,
            email: identity.email.clone(),
            rut: identity.rut.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            role: identity.role.clone(),
            permissions: identity.permissions.clone().into_inner(),
        }
    }
}

impl ProfileResponse {
    /// A profile is the identity enriched with the user's own record
    pub fn new(user: &User, identity: &Identity) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            rut: user.rut.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role: identity.role.clone(),
            permissions: identity.permissions.clone().into_inner(),
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            rut: user.rut.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role_id: user.role_id,
            is_active: user.is_active,
            email_verified: user.email_verified,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            description: role.description.clone(),
            permissions: role.permissions.clone().into_inner(),
        }
    }
}

impl From<&Cotizacion> for CotizacionResponse {
    fn from(cotizacion: &Cotizacion) -> Self {
        Self {
            id: cotizacion.id,
            cotizacion_id: cotizacion.cotizacion_ref.clone(),
            nombre: cotizacion.nombre.clone(),
            apellidos: cotizacion.apellidos.clone(),
            edad: cotizacion.edad,
            telefono: cotizacion.telefono.clone(),
            email: cotizacion.email.clone(),
            isapre: cotizacion.isapre.clone(),
            valor_mensual: cotizacion.valor_mensual,
            clinica: cotizacion.clinica.clone(),
            renta: cotizacion.renta,
            numero_cargas: cotizacion.numero_cargas,
            edades_cargas: cotizacion.edades_cargas.clone(),
            mensaje: cotizacion.mensaje.clone(),
            procedencia: cotizacion.procedencia.clone(),
            tipo_ingreso: cotizacion.tipo_ingreso.clone(),
            estado: cotizacion.estado,
            id_propietario: cotizacion.propietario.into_inner(),
            fecha_envio: cotizacion.fecha_envio,
        }
    }
}

impl From<&Cotizacion> for CotizacionEstadoResponse {
    fn from(cotizacion: &Cotizacion) -> Self {
        Self {
            cotizacion_id: cotizacion.cotizacion_ref.clone(),
            nombre: cotizacion.nombre.clone(),
            apellidos: cotizacion.apellidos.clone(),
            estado: cotizacion.estado,
            fecha_envio: cotizacion.fecha_envio,
        }
    }
}

impl From<&Comentario> for ComentarioResponse {
    fn from(comentario: &Comentario) -> Self {
        Self {
            id: comentario.id,
            nombre: comentario.nombre.clone(),
            estrellas: comentario.estrellas,
            comentario: comentario.comentario.clone(),
            ver: comentario.ver,
            fecha_creacion: comentario.fecha_creacion,
            fecha_actualizacion: comentario.fecha_actualizacion,
        }
    }
}

impl From<&Comentario> for ComentarioPublicoResponse {
    fn from(comentario: &Comentario) -> Self {
        Self {
            id: comentario.id,
            nombre: comentario.nombre.clone(),
            estrellas: comentario.estrellas,
            comentario: comentario.comentario.clone(),
            fecha_creacion: comentario.fecha_creacion,
        }
    }
}
