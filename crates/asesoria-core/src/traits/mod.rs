//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ComentarioFilter, ComentarioRepository, ComentarioUpdate, CotizacionFilter,
    CotizacionRepository, CotizacionUpdate, NewComentario, NewCotizacion, NewUser,
    RedeemedRefreshToken, RefreshTokenRepository, RepoResult, RoleRepository, UserRepository,
    UserUpdate,
};
