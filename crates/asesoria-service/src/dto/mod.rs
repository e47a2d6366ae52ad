//! Data transfer objects

mod mappers;
mod requests;
mod responses;

pub use requests::{
    ComentarioQuery, CotizacionQuery, CreateComentarioAdminRequest, CreateComentarioRequest,
    CreateCotizacionRequest, CreateUserRequest, EstadoUpdateRequest, ForgotPasswordRequest,
    LoginRequest, RefreshTokenRequest, RegisterRequest, ResetPasswordRequest, SetActiveRequest,
    UpdateComentarioRequest, UpdateCotizacionRequest, UpdateUserRequest, VisibilityRequest,
};
pub use responses::{
    AuthResponse, ComentarioListResponse, ComentarioPublicoResponse, ComentarioResponse,
    ComentarioStats, ComentariosPublicosResponse, CotizacionEstadoResponse,
    CotizacionListResponse, CotizacionResponse, CurrentUserResponse, ListStats, PaginationMeta,
    ProfileResponse, RegisteredResponse, RoleResponse, TokensResponse, UserListResponse,
    UserResponse,
};
