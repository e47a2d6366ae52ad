//! PostgreSQL implementation of ComentarioRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use asesoria_core::entities::Comentario;
use asesoria_core::traits::{
    ComentarioFilter, ComentarioRepository, ComentarioUpdate, NewComentario, RepoResult,
};
use asesoria_core::value_objects::TenantId;

use crate::models::ComentarioModel;

use super::error::{comentario_not_found, map_db_error};

const COMENTARIO_COLUMNS: &str =
    "id, nombre, estrellas, comentario, ver, id_propietario, fecha_creacion, fecha_actualizacion";

/// PostgreSQL implementation of ComentarioRepository
#[derive(Clone)]
pub struct PgComentarioRepository {
    pool: PgPool,
}

impl PgComentarioRepository {
    /// Create a new PgComentarioRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    tenant: TenantId,
    filter: &ComentarioFilter,
) {
    builder
        .push(" WHERE id_propietario = ")
        .push_bind(tenant.into_inner());

    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        builder
            .push(" AND (nombre ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR comentario ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(ver) = filter.ver {
        builder.push(" AND ver = ").push_bind(ver);
    }

    if let Some(estrellas) = filter.estrellas {
        builder.push(" AND estrellas = ").push_bind(estrellas);
    }
}

#[async_trait]
impl ComentarioRepository for PgComentarioRepository {
    #[instrument(skip(self, comentario), fields(nombre = %comentario.nombre))]
    async fn create(&self, comentario: NewComentario) -> RepoResult<Comentario> {
        let created = sqlx::query_as::<_, ComentarioModel>(&format!(
            r"
            INSERT INTO comentarios (nombre, estrellas, comentario, ver, id_propietario)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COMENTARIO_COLUMNS}
            "
        ))
        .bind(&comentario.nombre)
        .bind(comentario.estrellas)
        .bind(&comentario.comentario)
        .bind(comentario.ver)
        .bind(comentario.propietario.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Comentario::try_from(created)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64, tenant: TenantId) -> RepoResult<Option<Comentario>> {
        let result = sqlx::query_as::<_, ComentarioModel>(&format!(
            "SELECT {COMENTARIO_COLUMNS} FROM comentarios \
             WHERE id = $1 AND id_propietario = $2"
        ))
        .bind(id)
        .bind(tenant.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Comentario::try_from).transpose()
    }

    #[instrument(skip(self, filter))]
    async fn list(
        &self,
        tenant: TenantId,
        filter: &ComentarioFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Comentario>> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {COMENTARIO_COLUMNS} FROM comentarios"
        ));
        push_filters(&mut builder, tenant, filter);
        builder
            .push(" ORDER BY fecha_creacion DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build_query_as::<ComentarioModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(Comentario::try_from).collect()
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, tenant: TenantId, filter: &ComentarioFilter) -> RepoResult<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM comentarios");
        push_filters(&mut builder, tenant, filter);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_public(
        &self,
        tenant: TenantId,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Comentario>> {
        let rows = sqlx::query_as::<_, ComentarioModel>(&format!(
            r"
            SELECT {COMENTARIO_COLUMNS} FROM comentarios
            WHERE id_propietario = $1 AND ver = true
            ORDER BY fecha_creacion DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(tenant.into_inner())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Comentario::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_public(&self, tenant: TenantId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comentarios WHERE id_propietario = $1 AND ver = true",
        )
        .bind(tenant.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn average_stars_public(&self, tenant: TenantId) -> RepoResult<Option<f64>> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(estrellas)::float8 FROM comentarios \
             WHERE id_propietario = $1 AND ver = true",
        )
        .bind(tenant.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, update))]
    async fn update(
        &self,
        id: i64,
        tenant: TenantId,
        update: ComentarioUpdate,
    ) -> RepoResult<Comentario> {
        let result = sqlx::query_as::<_, ComentarioModel>(&format!(
            r"
            UPDATE comentarios
            SET nombre = COALESCE($3, nombre),
                estrellas = COALESCE($4, estrellas),
                comentario = COALESCE($5, comentario),
                ver = COALESCE($6, ver),
                fecha_actualizacion = NOW()
            WHERE id = $1 AND id_propietario = $2
            RETURNING {COMENTARIO_COLUMNS}
            "
        ))
        .bind(id)
        .bind(tenant.into_inner())
        .bind(&update.nombre)
        .bind(update.estrellas)
        .bind(&update.comentario)
        .bind(update.ver)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Comentario::try_from)
            .transpose()?
            .ok_or_else(|| comentario_not_found(id))
    }

    #[instrument(skip(self))]
    async fn set_visibility(
        &self,
        id: i64,
        tenant: TenantId,
        ver: bool,
    ) -> RepoResult<Comentario> {
        let result = sqlx::query_as::<_, ComentarioModel>(&format!(
            r"
            UPDATE comentarios
            SET ver = $3, fecha_actualizacion = NOW()
            WHERE id = $1 AND id_propietario = $2
            RETURNING {COMENTARIO_COLUMNS}
            "
        ))
        .bind(id)
        .bind(tenant.into_inner())
        .bind(ver)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Comentario::try_from)
            .transpose()?
            .ok_or_else(|| comentario_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64, tenant: TenantId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comentarios WHERE id = $1 AND id_propietario = $2")
            .bind(id)
            .bind(tenant.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comentario_not_found(id));
        }

        Ok(())
    }
}
