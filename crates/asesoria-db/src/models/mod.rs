//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comentario;
mod cotizacion;
mod refresh_token;
mod role;
mod user;

pub use comentario::ComentarioModel;
pub use cotizacion::CotizacionModel;
pub use refresh_token::RefreshTokenModel;
pub use role::RoleModel;
pub use user::{IdentityModel, UserModel};
