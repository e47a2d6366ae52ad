//! PostgreSQL implementation of CotizacionRepository
//!
//! List filtering maps the validated `CotizacionFilter` onto a parameterized
//! query through `sqlx::QueryBuilder`; no SQL fragment ever comes from
//! request input. Every statement carries the tenant predicate.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use asesoria_core::entities::Cotizacion;
use asesoria_core::traits::{
    CotizacionFilter, CotizacionRepository, CotizacionUpdate, NewCotizacion, RepoResult,
};
use asesoria_core::value_objects::{EstadoCotizacion, TenantId};
use asesoria_core::DomainError;

use crate::models::CotizacionModel;

use super::error::{cotizacion_not_found, map_db_error, map_unique_violation};

const COTIZACION_COLUMNS: &str = "id, cotizacion_id, nombre, apellidos, edad, telefono, email, \
     isapre, valor_mensual, clinica, renta, numero_cargas, edades_cargas, mensaje, \
     procedencia, tipo_ingreso, estado, id_propietario, fecha_envio";

/// PostgreSQL implementation of CotizacionRepository
#[derive(Clone)]
pub struct PgCotizacionRepository {
    pool: PgPool,
}

impl PgCotizacionRepository {
    /// Create a new PgCotizacionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the tenant predicate plus every set filter as bound parameters
fn push_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    tenant: TenantId,
    filter: &CotizacionFilter,
) {
    builder
        .push(" WHERE id_propietario = ")
        .push_bind(tenant.into_inner());

    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        builder
            .push(" AND (nombre ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR apellidos ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR cotizacion_id ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(estado) = filter.estado {
        builder.push(" AND estado = ").push_bind(estado.as_str());
    }

    for (column, value) in [
        ("isapre", &filter.isapre),
        ("clinica", &filter.clinica),
        ("procedencia", &filter.procedencia),
        ("tipo_ingreso", &filter.tipo_ingreso),
    ] {
        if let Some(value) = value {
            builder
                .push(format!(" AND {column} ILIKE "))
                .push_bind(format!("%{value}%"));
        }
    }

    if let Some(desde) = filter.fecha_desde {
        builder.push(" AND fecha_envio::date >= ").push_bind(desde);
    }

    if let Some(hasta) = filter.fecha_hasta {
        builder.push(" AND fecha_envio::date <= ").push_bind(hasta);
    }
}

#[async_trait]
impl CotizacionRepository for PgCotizacionRepository {
    #[instrument(skip(self, cotizacion), fields(reference = %cotizacion.cotizacion_ref))]
    async fn create(&self, cotizacion: NewCotizacion) -> RepoResult<Cotizacion> {
        let created = sqlx::query_as::<_, CotizacionModel>(&format!(
            r"
            INSERT INTO cotizacion (cotizacion_id, nombre, apellidos, edad, telefono, email,
                                    isapre, valor_mensual, clinica, renta, numero_cargas,
                                    edades_cargas, mensaje, procedencia, tipo_ingreso,
                                    id_propietario)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {COTIZACION_COLUMNS}
            "
        ))
        .bind(&cotizacion.cotizacion_ref)
        .bind(&cotizacion.nombre)
        .bind(&cotizacion.apellidos)
        .bind(cotizacion.edad)
        .bind(&cotizacion.telefono)
        .bind(&cotizacion.email)
        .bind(&cotizacion.isapre)
        .bind(cotizacion.valor_mensual)
        .bind(&cotizacion.clinica)
        .bind(cotizacion.renta)
        .bind(cotizacion.numero_cargas)
        .bind(&cotizacion.edades_cargas)
        .bind(&cotizacion.mensaje)
        .bind(&cotizacion.procedencia)
        .bind(&cotizacion.tipo_ingreso)
        .bind(cotizacion.propietario.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |_| {
                DomainError::DatabaseError("Duplicate cotizacion reference".to_string())
            })
        })?;

        Cotizacion::try_from(created)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64, tenant: TenantId) -> RepoResult<Option<Cotizacion>> {
        let result = sqlx::query_as::<_, CotizacionModel>(&format!(
            "SELECT {COTIZACION_COLUMNS} FROM cotizacion WHERE id = $1 AND id_propietario = $2"
        ))
        .bind(id)
        .bind(tenant.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Cotizacion::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_ref(
        &self,
        cotizacion_ref: &str,
        tenant: TenantId,
    ) -> RepoResult<Option<Cotizacion>> {
        let result = sqlx::query_as::<_, CotizacionModel>(&format!(
            "SELECT {COTIZACION_COLUMNS} FROM cotizacion \
             WHERE cotizacion_id = $1 AND id_propietario = $2"
        ))
        .bind(cotizacion_ref)
        .bind(tenant.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Cotizacion::try_from).transpose()
    }

    #[instrument(skip(self, filter))]
    async fn list(
        &self,
        tenant: TenantId,
        filter: &CotizacionFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Cotizacion>> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {COTIZACION_COLUMNS} FROM cotizacion"
        ));
        push_filters(&mut builder, tenant, filter);
        builder
            .push(" ORDER BY fecha_envio DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build_query_as::<CotizacionModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(Cotizacion::try_from).collect()
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, tenant: TenantId, filter: &CotizacionFilter) -> RepoResult<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM cotizacion");
        push_filters(&mut builder, tenant, filter);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn estado_counts(
        &self,
        tenant: TenantId,
    ) -> RepoResult<Vec<(EstadoCotizacion, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT estado, COUNT(*)
            FROM cotizacion
            WHERE id_propietario = $1
            GROUP BY estado
            ",
        )
        .bind(tenant.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|(estado, count)| Ok((estado.parse::<EstadoCotizacion>()?, count)))
            .collect()
    }

    #[instrument(skip(self, update))]
    async fn update(
        &self,
        id: i64,
        tenant: TenantId,
        update: CotizacionUpdate,
    ) -> RepoResult<Cotizacion> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE cotizacion SET ");

        {
            let mut fields = builder.separated(", ");
            if let Some(nombre) = update.nombre {
                fields.push("nombre = ").push_bind_unseparated(nombre);
            }
            if let Some(apellidos) = update.apellidos {
                fields.push("apellidos = ").push_bind_unseparated(apellidos);
            }
            if let Some(edad) = update.edad {
                fields.push("edad = ").push_bind_unseparated(edad);
            }
            if let Some(telefono) = update.telefono {
                fields.push("telefono = ").push_bind_unseparated(telefono);
            }
            if let Some(email) = update.email {
                fields.push("email = ").push_bind_unseparated(email);
            }
            if let Some(isapre) = update.isapre {
                fields.push("isapre = ").push_bind_unseparated(isapre);
            }
            if let Some(valor_mensual) = update.valor_mensual {
                fields
                    .push("valor_mensual = ")
                    .push_bind_unseparated(valor_mensual);
            }
            if let Some(clinica) = update.clinica {
                fields.push("clinica = ").push_bind_unseparated(clinica);
            }
            if let Some(renta) = update.renta {
                fields.push("renta = ").push_bind_unseparated(renta);
            }
            if let Some(numero_cargas) = update.numero_cargas {
                fields
                    .push("numero_cargas = ")
                    .push_bind_unseparated(numero_cargas);
            }
            if let Some(edades_cargas) = update.edades_cargas {
                fields
                    .push("edades_cargas = ")
                    .push_bind_unseparated(edades_cargas);
            }
            if let Some(mensaje) = update.mensaje {
                fields.push("mensaje = ").push_bind_unseparated(mensaje);
            }
            if let Some(procedencia) = update.procedencia {
                fields
                    .push("procedencia = ")
                    .push_bind_unseparated(procedencia);
            }
            if let Some(tipo_ingreso) = update.tipo_ingreso {
                fields
                    .push("tipo_ingreso = ")
                    .push_bind_unseparated(tipo_ingreso);
            }
            if let Some(estado) = update.estado {
                fields.push("estado = ").push_bind_unseparated(estado.as_str());
            }
        }

        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND id_propietario = ")
            .push_bind(tenant.into_inner())
            .push(format!(" RETURNING {COTIZACION_COLUMNS}"));

        let result = builder
            .build_query_as::<CotizacionModel>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result
            .map(Cotizacion::try_from)
            .transpose()?
            .ok_or_else(|| cotizacion_not_found(id))
    }

    #[instrument(skip(self))]
    async fn update_estado(
        &self,
        id: i64,
        tenant: TenantId,
        estado: EstadoCotizacion,
    ) -> RepoResult<Cotizacion> {
        let result = sqlx::query_as::<_, CotizacionModel>(&format!(
            r"
            UPDATE cotizacion
            SET estado = $3
            WHERE id = $1 AND id_propietario = $2
            RETURNING {COTIZACION_COLUMNS}
            "
        ))
        .bind(id)
        .bind(tenant.into_inner())
        .bind(estado.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Cotizacion::try_from)
            .transpose()?
            .ok_or_else(|| cotizacion_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64, tenant: TenantId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM cotizacion WHERE id = $1 AND id_propietario = $2")
            .bind(id)
            .bind(tenant.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(cotizacion_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_tenant(&self, tenant: TenantId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cotizacion WHERE id_propietario = $1")
            .bind(tenant.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCotizacionRepository>();
    }

    #[test]
    fn test_filters_produce_tenant_predicate_only_by_default() {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM cotizacion");
        push_filters(
            &mut builder,
            TenantId::FALLBACK,
            &CotizacionFilter::default(),
        );
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM cotizacion WHERE id_propietario = $1"
        );
    }

    #[test]
    fn test_filters_bind_values_not_fragments() {
        let filter = CotizacionFilter {
            search: Some("'; DROP TABLE cotizacion; --".to_string()),
            estado: Some(EstadoCotizacion::Pendiente),
            isapre: Some("Colmena".to_string()),
            ..Default::default()
        };
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM cotizacion");
        push_filters(&mut builder, TenantId::FALLBACK, &filter);

        let sql = builder.sql();
        // The search text must only appear as bind placeholders
        assert!(!sql.contains("DROP TABLE"));
        assert!(sql.contains("nombre ILIKE $2"));
        assert!(sql.contains("estado = $6"));
        assert!(sql.contains("isapre ILIKE $7"));
    }
}
