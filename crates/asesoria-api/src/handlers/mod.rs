//! HTTP handlers

pub mod auth;
pub mod comentarios;
pub mod cotizaciones;
pub mod health;
pub mod users;

use asesoria_core::entities::Identity;
use asesoria_core::value_objects::TenantId;

use crate::response::ApiError;

/// Gate for tenant-scoped admin routes: admin role plus the self-service
/// ownership check (the authenticated user administers only their own data).
fn authorize_admin(identity: &Identity, tenant: TenantId) -> Result<(), ApiError> {
    identity.require_role("admin").map_err(ApiError::Domain)?;
    identity
        .require_tenant_match(tenant)
        .map_err(ApiError::Domain)?;
    Ok(())
}
