//! # asesoria-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, ComentarioListResponse, ComentarioPublicoResponse, ComentarioQuery,
    ComentarioResponse, ComentarioStats, ComentariosPublicosResponse, CotizacionEstadoResponse,
    CotizacionListResponse, CotizacionQuery, CotizacionResponse, CreateComentarioAdminRequest,
    CreateComentarioRequest, CreateCotizacionRequest, CreateUserRequest, CurrentUserResponse,
    EstadoUpdateRequest, ForgotPasswordRequest, ListStats, LoginRequest, PaginationMeta,
    ProfileResponse, RefreshTokenRequest, RegisterRequest, RegisteredResponse,
    ResetPasswordRequest, RoleResponse, SetActiveRequest, TokensResponse,
    UpdateComentarioRequest, UpdateCotizacionRequest, UpdateUserRequest, UserListResponse,
    UserResponse, VisibilityRequest,
};
pub use services::{
    AuthService, ComentarioService, CotizacionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, SessionService, SessionTokens, UserService,
};
