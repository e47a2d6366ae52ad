//! Health check handlers

use axum::extract::State;
use chrono::Utc;
use serde_json::json;

use crate::response::{ApiError, ApiResult, ApiSuccess};
use crate::state::AppState;

/// Liveness check
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> ApiSuccess<serde_json::Value> {
    ApiSuccess::new(
        "Servidor funcionando correctamente",
        json!({
            "timestamp": Utc::now().to_rfc3339(),
            "environment": format!("{:?}", state.config().app.env).to_lowercase(),
        }),
    )
}

/// Readiness check: verifies the database answers
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> ApiResult<ApiSuccess<()>> {
    asesoria_db::pool::ping(state.service_context().pool())
        .await
        .map_err(ApiError::internal)?;

    Ok(ApiSuccess::message("Listo"))
}
