//! Comentario service
//!
//! Public testimonial intake plus the tenant-scoped admin moderation CRUD.

use asesoria_core::traits::{ComentarioFilter, ComentarioUpdate, NewComentario};
use asesoria_core::value_objects::TenantId;
use tracing::{info, instrument};

use crate::dto::{
    ComentarioListResponse, ComentarioPublicoResponse, ComentarioQuery, ComentarioResponse,
    ComentarioStats, ComentariosPublicosResponse, CreateComentarioAdminRequest,
    CreateComentarioRequest, PaginationMeta, UpdateComentarioRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comentario service
pub struct ComentarioService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ComentarioService<'a> {
    /// Create a new ComentarioService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public submission. Always created hidden, whatever the payload says;
    /// an administrator approves it later.
    #[instrument(skip(self, request), fields(tenant = %tenant))]
    pub async fn create_public(
        &self,
        tenant: TenantId,
        request: CreateComentarioRequest,
    ) -> ServiceResult<ComentarioPublicoResponse> {
        let created = self
            .ctx
            .comentario_repo()
            .create(NewComentario {
                nombre: request.nombre.trim().to_string(),
                estrellas: request.estrellas,
                comentario: request.comentario.trim().to_string(),
                ver: false,
                propietario: tenant,
            })
            .await?;

        info!(id = created.id, "Comentario received");
        Ok(ComentarioPublicoResponse::from(&created))
    }

    /// Admin creation; may start visible
    #[instrument(skip(self, request), fields(tenant = %tenant))]
    pub async fn create_admin(
        &self,
        tenant: TenantId,
        request: CreateComentarioAdminRequest,
    ) -> ServiceResult<ComentarioResponse> {
        let created = self
            .ctx
            .comentario_repo()
            .create(NewComentario {
                nombre: request.nombre.trim().to_string(),
                estrellas: request.estrellas,
                comentario: request.comentario.unwrap_or_default().trim().to_string(),
                ver: request.ver.unwrap_or(false),
                propietario: tenant,
            })
            .await?;

        info!(id = created.id, "Comentario created from admin panel");
        Ok(ComentarioResponse::from(&created))
    }

    /// Public listing: approved comments only, with the rating aggregate
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn list_public(
        &self,
        tenant: TenantId,
        page: i64,
        limit: i64,
    ) -> ServiceResult<ComentariosPublicosResponse> {
        let offset = (page - 1) * limit;

        let rows = self
            .ctx
            .comentario_repo()
            .list_public(tenant, limit, offset)
            .await?;
        let total = self.ctx.comentario_repo().count_public(tenant).await?;
        let promedio = self
            .ctx
            .comentario_repo()
            .average_stars_public(tenant)
            .await?
            .unwrap_or(0.0);

        Ok(ComentariosPublicosResponse {
            comentarios: rows.iter().map(ComentarioPublicoResponse::from).collect(),
            pagination: PaginationMeta::new(page, limit, total),
            estadisticas: ComentarioStats {
                promedio_estrellas: (promedio * 10.0).round() / 10.0,
                total_comentarios: total,
            },
        })
    }

    /// Admin listing with moderation filters
    #[instrument(skip(self, query), fields(tenant = %tenant))]
    pub async fn list(
        &self,
        tenant: TenantId,
        query: ComentarioQuery,
        page: i64,
        limit: i64,
    ) -> ServiceResult<ComentarioListResponse> {
        let filter = ComentarioFilter {
            search: query.search.filter(|s| !s.trim().is_empty()),
            ver: query.ver,
            estrellas: query.estrellas,
        };
        let offset = (page - 1) * limit;

        let rows = self
            .ctx
            .comentario_repo()
            .list(tenant, &filter, limit, offset)
            .await?;
        let total = self.ctx.comentario_repo().count(tenant, &filter).await?;

        Ok(ComentarioListResponse {
            comentarios: rows.iter().map(ComentarioResponse::from).collect(),
            pagination: PaginationMeta::new(page, limit, total),
        })
    }

    /// Fetch one comentario within the tenant's scope
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn get(&self, tenant: TenantId, id: i64) -> ServiceResult<ComentarioResponse> {
        let comentario = self
            .ctx
            .comentario_repo()
            .find_by_id(id, tenant)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comentario", id.to_string()))?;

        Ok(ComentarioResponse::from(&comentario))
    }

    /// Partial update; rejects requests that change nothing
    #[instrument(skip(self, request), fields(tenant = %tenant))]
    pub async fn update(
        &self,
        tenant: TenantId,
        id: i64,
        request: UpdateComentarioRequest,
    ) -> ServiceResult<ComentarioResponse> {
        let update = ComentarioUpdate {
            nombre: request.nombre,
            estrellas: request.estrellas,
            comentario: request.comentario,
            ver: request.ver,
        };

        if update.is_empty() {
            return Err(ServiceError::validation(
                "No se proporcionaron campos para actualizar",
            ));
        }

        let updated = self
            .ctx
            .comentario_repo()
            .update(id, tenant, update)
            .await?;

        Ok(ComentarioResponse::from(&updated))
    }

    /// Approve or hide a testimonial
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn set_visibility(
        &self,
        tenant: TenantId,
        id: i64,
        ver: bool,
    ) -> ServiceResult<ComentarioResponse> {
        let updated = self
            .ctx
            .comentario_repo()
            .set_visibility(id, tenant, ver)
            .await?;

        info!(id, ver, "Comentario visibility changed");
        Ok(ComentarioResponse::from(&updated))
    }

    /// Delete within the tenant's scope
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn delete(&self, tenant: TenantId, id: i64) -> ServiceResult<()> {
        self.ctx.comentario_repo().delete(id, tenant).await?;
        info!(id, "Comentario deleted");
        Ok(())
    }
}
