//! Cotizacion service
//!
//! Public form intake (with notification emails) and the tenant-scoped
//! admin CRUD. Every repository call carries the resolved tenant; a record
//! belonging to another tenant is indistinguishable from a missing one.

use asesoria_core::entities::generate_cotizacion_ref;
use asesoria_core::traits::{CotizacionFilter, CotizacionUpdate, NewCotizacion};
use asesoria_core::value_objects::{EstadoCotizacion, TenantId};
use asesoria_mailer::EmailTemplate;
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::dto::{
    CotizacionEstadoResponse, CotizacionListResponse, CotizacionQuery, CotizacionResponse,
    CreateCotizacionRequest, ListStats, PaginationMeta, UpdateCotizacionRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Cotizacion service
pub struct CotizacionService<'a> {
    ctx: &'a ServiceContext,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn build_new(
    request: CreateCotizacionRequest,
    email: String,
    tenant: TenantId,
) -> NewCotizacion {
    NewCotizacion {
        cotizacion_ref: generate_cotizacion_ref(Utc::now()),
        nombre: request.nombre.trim().to_string(),
        apellidos: trimmed(request.apellidos),
        edad: request.edad,
        telefono: trimmed(request.telefono),
        email,
        isapre: trimmed(request.isapre),
        valor_mensual: request.valor_mensual.unwrap_or(0),
        clinica: trimmed(request.clinica),
        renta: request.renta.unwrap_or(0),
        numero_cargas: request.numero_cargas.unwrap_or(0),
        edades_cargas: trimmed(request.edades_cargas),
        mensaje: trimmed(request.mensaje),
        procedencia: trimmed(request.procedencia),
        tipo_ingreso: trimmed(request.tipo_ingreso),
        propietario: tenant,
    }
}

impl From<CotizacionQuery> for CotizacionFilter {
    fn from(query: CotizacionQuery) -> Self {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Self {
            search: non_empty(query.search),
            estado: query.estado,
            isapre: non_empty(query.isapre),
            clinica: non_empty(query.clinica),
            procedencia: non_empty(query.procedencia),
            tipo_ingreso: non_empty(query.tipo_ingreso),
            fecha_desde: query.fecha_desde,
            fecha_hasta: query.fecha_hasta,
        }
    }
}

impl<'a> CotizacionService<'a> {
    /// Create a new CotizacionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public form submission. Requires an email; confirms to the visitor
    /// and notifies active administrators, both best-effort.
    #[instrument(skip(self, request), fields(tenant = %tenant))]
    pub async fn create_public(
        &self,
        tenant: TenantId,
        request: CreateCotizacionRequest,
    ) -> ServiceResult<CotizacionResponse> {
        let email = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from)
            .ok_or_else(|| ServiceError::validation("El email es obligatorio"))?;

        let created = self
            .ctx
            .cotizacion_repo()
            .create(build_new(request, email, tenant))
            .await?;

        info!(reference = %created.cotizacion_ref, "Cotizacion received");

        if let Some(mailer) = self.ctx.mailer() {
            mailer.spawn_send(
                created.email.clone(),
                EmailTemplate::CotizacionRecibida {
                    cotizacion: &created,
                },
            );

            match self.ctx.user_repo().list_admin_emails().await {
                Ok(admins) => {
                    for admin in admins {
                        mailer.spawn_send(
                            admin,
                            EmailTemplate::CotizacionNueva {
                                cotizacion: &created,
                            },
                        );
                    }
                }
                Err(e) => warn!(error = %e, "Could not load admin emails for notification"),
            }
        }

        Ok(CotizacionResponse::from(&created))
    }

    /// Admin-panel creation: same record shape, no emails, email optional
    #[instrument(skip(self, request), fields(tenant = %tenant))]
    pub async fn create_admin(
        &self,
        tenant: TenantId,
        request: CreateCotizacionRequest,
    ) -> ServiceResult<CotizacionResponse> {
        let email = trimmed(request.email.clone());

        let created = self
            .ctx
            .cotizacion_repo()
            .create(build_new(request, email, tenant))
            .await?;

        info!(reference = %created.cotizacion_ref, "Cotizacion created from admin panel");
        Ok(CotizacionResponse::from(&created))
    }

    /// Tenant-scoped listing with filters, pagination and per-estado stats
    #[instrument(skip(self, query), fields(tenant = %tenant))]
    pub async fn list(
        &self,
        tenant: TenantId,
        query: CotizacionQuery,
        page: i64,
        limit: i64,
    ) -> ServiceResult<CotizacionListResponse> {
        let filter = CotizacionFilter::from(query);
        let offset = (page - 1) * limit;

        let rows = self
            .ctx
            .cotizacion_repo()
            .list(tenant, &filter, limit, offset)
            .await?;
        let total = self.ctx.cotizacion_repo().count(tenant, &filter).await?;
        let counts = self.ctx.cotizacion_repo().estado_counts(tenant).await?;

        Ok(CotizacionListResponse {
            cotizaciones: rows.iter().map(CotizacionResponse::from).collect(),
            pagination: PaginationMeta::new(page, limit, total),
            stats: ListStats::from_counts(&counts),
        })
    }

    /// Fetch one record within the tenant's scope
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn get(&self, tenant: TenantId, id: i64) -> ServiceResult<CotizacionResponse> {
        let cotizacion = self
            .ctx
            .cotizacion_repo()
            .find_by_id(id, tenant)
            .await?
            .ok_or_else(|| ServiceError::not_found("Cotizacion", id.to_string()))?;

        Ok(CotizacionResponse::from(&cotizacion))
    }

    /// Public status lookup by COT-... reference
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn estado_lookup(
        &self,
        tenant: TenantId,
        reference: &str,
    ) -> ServiceResult<CotizacionEstadoResponse> {
        let cotizacion = self
            .ctx
            .cotizacion_repo()
            .find_by_ref(reference, tenant)
            .await?
            .ok_or_else(|| {
                asesoria_core::DomainError::CotizacionRefNotFound(reference.to_string())
            })?;

        Ok(CotizacionEstadoResponse::from(&cotizacion))
    }

    /// Partial update; rejects requests that change nothing
    #[instrument(skip(self, request), fields(tenant = %tenant))]
    pub async fn update(
        &self,
        tenant: TenantId,
        id: i64,
        request: UpdateCotizacionRequest,
    ) -> ServiceResult<CotizacionResponse> {
        let update = CotizacionUpdate {
            nombre: request.nombre,
            apellidos: request.apellidos,
            edad: request.edad,
            telefono: request.telefono,
            email: request.email,
            isapre: request.isapre,
            valor_mensual: request.valor_mensual,
            clinica: request.clinica,
            renta: request.renta,
            numero_cargas: request.numero_cargas,
            edades_cargas: request.edades_cargas,
            mensaje: request.mensaje,
            procedencia: request.procedencia,
            tipo_ingreso: request.tipo_ingreso,
            estado: request.estado,
        };

        if update.is_empty() {
            return Err(ServiceError::validation(
                "No se proporcionaron campos para actualizar",
            ));
        }

        let updated = self
            .ctx
            .cotizacion_repo()
            .update(id, tenant, update)
            .await?;

        Ok(CotizacionResponse::from(&updated))
    }

    /// Estado-only transition
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn update_estado(
        &self,
        tenant: TenantId,
        id: i64,
        estado: EstadoCotizacion,
    ) -> ServiceResult<CotizacionResponse> {
        let updated = self
            .ctx
            .cotizacion_repo()
            .update_estado(id, tenant, estado)
            .await?;

        info!(id, estado = %estado, "Cotizacion estado updated");
        Ok(CotizacionResponse::from(&updated))
    }

    /// Delete within the tenant's scope
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn delete(&self, tenant: TenantId, id: i64) -> ServiceResult<()> {
        self.ctx.cotizacion_repo().delete(id, tenant).await?;
        info!(id, "Cotizacion deleted");
        Ok(())
    }
}
