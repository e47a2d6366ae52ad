//! User model mappers

use asesoria_core::entities::{Identity, User};
use asesoria_core::value_objects::PermissionSet;

use crate::models::{IdentityModel, UserModel};

/// Convert UserModel to User entity. The password hash never leaves the
/// database layer through this path.
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            rut: model.rut,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            role_id: model.role_id,
            is_active: model.is_active,
            email_verified: model.email_verified,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert the joined user+role row into an Identity
impl From<IdentityModel> for Identity {
    fn from(model: IdentityModel) -> Self {
        Identity {
            user_id: model.id,
            rut: model.rut,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role_name,
            permissions: model
                .permissions
                .map(|p| PermissionSet::new(p.0))
                .unwrap_or_default(),
        }
    }
}
