//! Service implementations

mod auth;
mod comentario;
mod context;
mod cotizacion;
mod error;
mod session;
mod user;

pub use auth::AuthService;
pub use comentario::ComentarioService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use cotizacion::CotizacionService;
pub use error::{ServiceError, ServiceResult};
pub use session::{SessionService, SessionTokens};
pub use user::UserService;
