//! Domain entities

mod comentario;
mod cotizacion;
mod role;
mod user;

pub use comentario::Comentario;
pub use cotizacion::{generate_cotizacion_ref, Cotizacion};
pub use role::Role;
pub use user::{Identity, User};
