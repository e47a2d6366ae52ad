//! Role model mapper

use asesoria_core::entities::Role;
use asesoria_core::value_objects::PermissionSet;

use crate::models::RoleModel;

impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role {
            id: model.id,
            name: model.name,
            description: model.description,
            permissions: PermissionSet::new(model.permissions.0),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
