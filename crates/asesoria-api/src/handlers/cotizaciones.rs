//! Cotizacion handlers
//!
//! The public intake endpoints resolve the tenant only to stamp/filter
//! data; the admin endpoints additionally require the admin role and the
//! tenant-ownership match.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use asesoria_service::{
    CotizacionEstadoResponse, CotizacionListResponse, CotizacionQuery, CotizacionResponse,
    CotizacionService, CreateCotizacionRequest, EstadoUpdateRequest, UpdateCotizacionRequest,
};

use crate::extractors::{CurrentUser, Pagination, TenantScope, ValidatedJson};
use crate::response::{ApiResult, ApiSuccess, Created};
use crate::state::AppState;

use super::authorize_admin;

/// Public quote form submission
///
/// POST /api/cotizaciones
pub async fn crear(
    State(state): State<AppState>,
    scope: TenantScope,
    ValidatedJson(request): ValidatedJson<CreateCotizacionRequest>,
) -> ApiResult<Created<CotizacionResponse>> {
    let tenant = scope.or_body(request.propietario_id)?;
    let service = CotizacionService::new(state.service_context());
    let response = service.create_public(tenant, request).await?;
    Ok(Created(ApiSuccess::new(
        "Cotizacion enviada exitosamente. Te contactaremos pronto.",
        response,
    )))
}

/// Admin-panel creation (no notification emails)
///
/// POST /api/cotizaciones/admin
pub async fn crear_admin(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    ValidatedJson(request): ValidatedJson<CreateCotizacionRequest>,
) -> ApiResult<Created<CotizacionResponse>> {
    let tenant = scope.or_body(request.propietario_id)?;
    authorize_admin(&identity, tenant)?;

    let service = CotizacionService::new(state.service_context());
    let response = service.create_admin(tenant, request).await?;
    Ok(Created(ApiSuccess::new(
        "Cotizacion creada exitosamente desde el panel de administracion.",
        response,
    )))
}

/// Tenant-scoped admin listing with filters and stats
///
/// GET /api/cotizaciones
pub async fn listar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    pagination: Pagination,
    Query(query): Query<CotizacionQuery>,
) -> ApiResult<ApiSuccess<CotizacionListResponse>> {
    let tenant = scope.resolve();
    authorize_admin(&identity, tenant)?;

    let service = CotizacionService::new(state.service_context());
    let response = service
        .list(tenant, query, pagination.page, pagination.limit)
        .await?;
    Ok(ApiSuccess::new("Cotizaciones obtenidas", response))
}

/// Public status lookup by COT-... reference
///
/// GET /api/cotizaciones/estado/:cotizacion_id
pub async fn consultar_estado(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(reference): Path<String>,
) -> ApiResult<ApiSuccess<CotizacionEstadoResponse>> {
    let tenant = scope.resolve();
    let service = CotizacionService::new(state.service_context());
    let response = service.estado_lookup(tenant, &reference).await?;
    Ok(ApiSuccess::new("Estado de la cotizacion", response))
}

/// Fetch one cotizacion
///
/// GET /api/cotizaciones/:id
pub async fn obtener(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    Path(id): Path<i64>,
) -> ApiResult<ApiSuccess<CotizacionResponse>> {
    let tenant = scope.resolve();
    authorize_admin(&identity, tenant)?;

    let service = CotizacionService::new(state.service_context());
    let response = service.get(tenant, id).await?;
    Ok(ApiSuccess::new("Cotizacion obtenida", response))
}

/// Partial update of a cotizacion
///
/// PUT /api/cotizaciones/:id
pub async fn actualizar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateCotizacionRequest>,
) -> ApiResult<ApiSuccess<CotizacionResponse>> {
    let tenant = scope.or_body(request.propietario_id)?;
    authorize_admin(&identity, tenant)?;

    let service = CotizacionService::new(state.service_context());
    let response = service.update(tenant, id, request).await?;
    Ok(ApiSuccess::new("Cotizacion actualizada exitosamente", response))
}

/// Estado-only transition
///
/// PATCH /api/cotizaciones/:id/estado
pub async fn actualizar_estado(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    Path(id): Path<i64>,
    Json(request): Json<EstadoUpdateRequest>,
) -> ApiResult<ApiSuccess<CotizacionResponse>> {
    let tenant = scope.or_body(request.propietario_id)?;
    authorize_admin(&identity, tenant)?;

    let service = CotizacionService::new(state.service_context());
    let response = service.update_estado(tenant, id, request.estado).await?;
    Ok(ApiSuccess::new("Estado actualizado exitosamente", response))
}

/// Delete a cotizacion
///
/// DELETE /api/cotizaciones/:id
pub async fn eliminar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    scope: TenantScope,
    Path(id): Path<i64>,
) -> ApiResult<ApiSuccess<()>> {
    let tenant = scope.resolve();
    authorize_admin(&identity, tenant)?;

    let service = CotizacionService::new(state.service_context());
    service.delete(tenant, id).await?;
    Ok(ApiSuccess::message("Cotizacion eliminada exitosamente"))
}
