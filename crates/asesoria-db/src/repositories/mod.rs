//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! asesoria-core. Each repository handles database operations for a specific
//! domain entity; cotizacion and comentario repositories take the resolved
//! tenant on every call.

mod comentario;
mod cotizacion;
mod error;
mod refresh_token;
mod role;
mod user;

pub use comentario::PgComentarioRepository;
pub use cotizacion::PgCotizacionRepository;
pub use refresh_token::PgRefreshTokenRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;
