//! Server setup and initialization
//!
//! Provides the main application builder, dependency wiring, the periodic
//! refresh-token sweep, and the server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use asesoria_common::{AppConfig, AppError, JwtService};
use asesoria_db::{
    create_pool, PgComentarioRepository, PgCotizacionRepository, PgRefreshTokenRepository,
    PgRoleRepository, PgUserRepository,
};
use asesoria_mailer::{Mailer, SmtpConfig};
use asesoria_service::{ServiceContextBuilder, SessionService};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::middleware::{apply_middleware, apply_plain_middleware};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Interval between runs of the expired refresh-token sweep
const TOKEN_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_plain_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool. Failure here is fatal to startup.
    info!("Connecting to PostgreSQL...");
    let db_config = asesoria_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    // Create mailer when SMTP is configured; without it, emails are skipped
    let mailer = match &config.mail {
        Some(mail) => Some(
            Mailer::new(&SmtpConfig::from(mail), config.app.frontend_url.clone())
                .map_err(|e| AppError::Config(e.to_string()))?,
        ),
        None => {
            warn!("EMAIL_HOST not set; outbound email disabled");
            None
        }
    };

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let role_repo = Arc::new(PgRoleRepository::new(pool.clone()));
    let refresh_token_repo = Arc::new(PgRefreshTokenRepository::new(pool.clone()));
    let cotizacion_repo = Arc::new(PgCotizacionRepository::new(pool.clone()));
    let comentario_repo = Arc::new(PgComentarioRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .role_repo(role_repo)
        .refresh_token_repo(refresh_token_repo)
        .cotizacion_repo(cotizacion_repo)
        .comentario_repo(comentario_repo)
        .jwt_service(jwt_service)
        .mailer(mailer)
        .refresh_token_expiry(config.jwt.refresh_token_expiry)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Start the recurring expired-token sweep.
///
/// Runs independently of request traffic; a failing sweep is logged and
/// retried on the next tick, never fatal to the process.
pub fn spawn_token_sweep(state: &AppState) {
    let state = state.clone();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TOKEN_SWEEP_INTERVAL);
        // The first tick fires immediately, which doubles as a startup
        // cleanup of tokens that expired while the server was down.
        loop {
            interval.tick().await;
            let sessions = SessionService::new(state.service_context());
            if let Err(e) = sessions.sweep_expired().await {
                error!(error = %e, "Refresh-token sweep failed");
            }
        }
    });
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Start the background sweep
    spawn_token_sweep(&state);

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
