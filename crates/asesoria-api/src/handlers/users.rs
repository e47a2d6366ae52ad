//! User management handlers (admin panel)
//!
//! Listing/reading requires the admin or supervisor role; mutations require
//! the corresponding `users:*` permission.

use axum::{
    extract::{Path, State},
    Json,
};
use asesoria_core::value_objects::permisos;
use asesoria_service::{
    CreateUserRequest, RoleResponse, SetActiveRequest, UpdateUserRequest, UserListResponse,
    UserResponse, UserService,
};

use crate::extractors::{CurrentUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, ApiSuccess, Created};
use crate::state::AppState;

/// List users
///
/// GET /api/users
pub async fn listar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    pagination: Pagination,
) -> ApiResult<ApiSuccess<UserListResponse>> {
    identity
        .require_any_role(&["admin", "supervisor"])
        .map_err(ApiError::Domain)?;

    let service = UserService::new(state.service_context());
    let response = service.list(pagination.page, pagination.limit).await?;
    Ok(ApiSuccess::new("Usuarios obtenidos", response))
}

/// List roles
///
/// GET /api/users/roles
pub async fn listar_roles(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> ApiResult<ApiSuccess<Vec<RoleResponse>>> {
    identity
        .require_any_role(&["admin", "supervisor"])
        .map_err(ApiError::Domain)?;

    let service = UserService::new(state.service_context());
    let response = service.roles().await?;
    Ok(ApiSuccess::new("Roles obtenidos", response))
}

/// Fetch one user
///
/// GET /api/users/:id
pub async fn obtener(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<ApiSuccess<UserResponse>> {
    identity
        .require_any_role(&["admin", "supervisor"])
        .map_err(ApiError::Domain)?;

    let service = UserService::new(state.service_context());
    let response = service.get(id).await?;
    Ok(ApiSuccess::new("Usuario obtenido", response))
}

/// Create a user
///
/// POST /api/users
pub async fn crear(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<UserResponse>> {
    identity
        .require_permission(permisos::USERS_WRITE)
        .map_err(ApiError::Domain)?;

    let service = UserService::new(state.service_context());
    let response = service.create(request).await?;
    Ok(Created(ApiSuccess::new("Usuario creado exitosamente", response)))
}

/// Update a user
///
/// PUT /api/users/:id
pub async fn actualizar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<ApiSuccess<UserResponse>> {
    identity
        .require_permission(permisos::USERS_WRITE)
        .map_err(ApiError::Domain)?;

    let service = UserService::new(state.service_context());
    let response = service.update(id, request).await?;
    Ok(ApiSuccess::new("Usuario actualizado exitosamente", response))
}

/// Toggle the active flag
///
/// PATCH /api/users/:id/active
pub async fn cambiar_activo(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<SetActiveRequest>,
) -> ApiResult<ApiSuccess<()>> {
    identity
        .require_permission(permisos::USERS_WRITE)
        .map_err(ApiError::Domain)?;

    let service = UserService::new(state.service_context());
    service.set_active(id, request.is_active).await?;
    Ok(ApiSuccess::message("Estado del usuario actualizado"))
}

/// Delete a user; refused while the user owns cotizaciones
///
/// DELETE /api/users/:id
pub async fn eliminar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<ApiSuccess<()>> {
    identity
        .require_permission(permisos::USERS_DELETE)
        .map_err(ApiError::Domain)?;

    let service = UserService::new(state.service_context());
    service.delete(id).await?;
    Ok(ApiSuccess::message("Usuario eliminado exitosamente"))
}
