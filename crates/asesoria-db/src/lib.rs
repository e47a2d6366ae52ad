//! # asesoria-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `asesoria-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity mappers
//! - Repository implementations, including the tenant filtering applied to
//!   every cotizacion/comentario query and the atomic refresh-token
//!   redemption statement
//!
//! ## Usage
//!
//! ```rust,ignore
//! use asesoria_db::pool::{create_pool, DatabaseConfig};
//! use asesoria_db::PgUserRepository;
//! use asesoria_core::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgComentarioRepository, PgCotizacionRepository, PgRefreshTokenRepository, PgRoleRepository,
    PgUserRepository,
};
