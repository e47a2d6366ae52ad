//! Comentario entity - a public testimonial

use chrono::{DateTime, Utc};

use crate::value_objects::TenantId;

/// Visitor testimonial with a 1-5 star rating.
///
/// Public submissions start hidden (`ver = false`) until an administrator
/// approves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comentario {
    pub id: i64,
    pub nombre: String,
    pub estrellas: i16,
    pub comentario: String,
    pub ver: bool,
    pub propietario: TenantId,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

impl Comentario {
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.ver
    }
}
