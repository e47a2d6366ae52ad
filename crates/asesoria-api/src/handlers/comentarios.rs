//! Comentario handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use asesoria_service::{
    ComentarioListResponse, ComentarioPublicoResponse, ComentarioQuery, ComentarioResponse,
    ComentarioService, ComentariosPublicosResponse, CreateComentarioAdminRequest,
    CreateComentarioRequest, UpdateComentarioRequest, VisibilityRequest,
};

use crate::extractors::{CurrentUser, Pagination, TenantScope, ValidatedJson};
use crate::response::{ApiResult, ApiSuccess, Created};
use crate::state::AppState;

use super::authorize_admin;

/// Public testimonial submission; created hidden until approved
///
/// POST /api/comentarios
pub async fn crear(
    State(state): State<AppState>,
    scope: TenantScope,
    ValidatedJson(request): ValidatedJson<CreateComentarioRequest>,
) -> ApiResult<Created<ComentarioPublicoResponse>> {
    let tenant = scope.or_body(request.propietario_id)?;
    let service = ComentarioService::new(state.service_context());
    let response = service.create_public(tenant, request).await?;
    Ok(Created(ApiSuccess::new(
        "Comentario enviado exitosamente. Sera revisado por nuestro equipo.",
        response,
    )))
}

/// Admin creation; may start visible
///
/// POST /api/comentarios/admin
pub async fn crear_admin(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    ValidatedJson(request): ValidatedJson<CreateComentarioAdminRequest>,
) -> ApiResult<Created<ComentarioResponse>> {
    let tenant = scope.or_body(request.propietario_id)?;
    authorize_admin(&identity, tenant)?;

    let service = ComentarioService::new(state.service_context());
    let response = service.create_admin(tenant, request).await?;
    Ok(Created(ApiSuccess::new(
        "Comentario creado exitosamente desde el panel de administracion.",
        response,
    )))
}

/// Public listing of approved testimonials
///
/// GET /api/comentarios/publicos
pub async fn listar_publicos(
    State(state): State<AppState>,
    scope: TenantScope,
    pagination: Pagination,
) -> ApiResult<ApiSuccess<ComentariosPublicosResponse>> {
    let tenant = scope.resolve();
    let service = ComentarioService::new(state.service_context());
    let response = service
        .list_public(tenant, pagination.page, pagination.limit)
        .await?;
    Ok(ApiSuccess::new("Comentarios obtenidos", response))
}

/// Admin moderation listing
///
/// GET /api/comentarios
pub async fn listar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    pagination: Pagination,
    Query(query): Query<ComentarioQuery>,
) -> ApiResult<ApiSuccess<ComentarioListResponse>> {
    let tenant = scope.resolve();
    authorize_admin(&identity, tenant)?;

    let service = ComentarioService::new(state.service_context());
    let response = service
        .list(tenant, query, pagination.page, pagination.limit)
        .await?;
    Ok(ApiSuccess::new("Comentarios obtenidos", response))
}

/// Fetch one comentario
///
/// GET /api/comentarios/:id
pub async fn obtener(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    Path(id): Path<i64>,
) -> ApiResult<ApiSuccess<ComentarioResponse>> {
    let tenant = scope.resolve();
    authorize_admin(&identity, tenant)?;

    let service = ComentarioService::new(state.service_context());
    let response = service.get(tenant, id).await?;
    Ok(ApiSuccess::new("Comentario obtenido", response))
}

/// Partial update of a comentario
///
/// PUT /api/comentarios/:id
pub async fn actualizar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateComentarioRequest>,
) -> ApiResult<ApiSuccess<ComentarioResponse>> {
    let tenant = scope.or_body(request.propietario_id)?;
    authorize_admin(&identity, tenant)?;

    let service = ComentarioService::new(state.service_context());
    let response = service.update(tenant, id, request).await?;
    Ok(ApiSuccess::new("Comentario actualizado exitosamente", response))
}

/// Approve or hide a testimonial
///
/// PATCH /api/comentarios/:id/visibilidad
pub async fn cambiar_visibilidad(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    Path(id): Path<i64>,
    Json(request): Json<VisibilityRequest>,
) -> ApiResult<ApiSuccess<ComentarioResponse>> {
    let tenant = scope.or_body(request.propietario_id)?;
    authorize_admin(&identity, tenant)?;

    let service = ComentarioService::new(state.service_context());
    let response = service.set_visibility(tenant, id, request.ver).await?;
    Ok(ApiSuccess::new("Visibilidad actualizada exitosamente", response))
}

/// Delete a comentario
///
/// DELETE /api/comentarios/:id
pub async fn eliminar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    Path(id): Path<i64>,
) -> ApiResult<ApiSuccess<()>> {
    let tenant = scope.resolve();
    authorize_admin(&identity, tenant)?;

    let service = ComentarioService::new(state.service_context());
    service.delete(tenant, id).await?;
    Ok(ApiSuccess::message("Comentario eliminado exitosamente"))
}
