//! Authentication extractor
//!
//! Extracts the bearer token from the Authorization header and resolves it
//! to a full [`Identity`]: signature/expiry verification, then the user
//! joined with role and permissions, with account-state checks applied.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use asesoria_core::entities::Identity;
use asesoria_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated identity extracted from the bearer token.
///
/// Using this extractor makes a route protected: requests without a valid
/// token (or with an inactive/unverified account) are rejected before the
/// handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let identity = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Authentication failed");
                ApiError::Service(e)
            })?;

        Ok(CurrentUser(identity))
    }
}
