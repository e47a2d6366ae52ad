//! # asesoria-common
//!
//! Shared application-layer utilities: configuration loading, the unified
//! `AppError` type, JWT/password/token helpers, and tracing setup.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

pub use auth::{generate_opaque_token, Claims, JwtService, OPAQUE_TOKEN_LEN};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    MailConfig, RateLimitConfig, ServerConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig};
