//! Session manager
//!
//! Issues, rotates, and revokes the (access token, refresh token) pair.
//! Access tokens are stateless JWTs; refresh tokens are single-use opaque
//! strings persisted one row per issuance.

use asesoria_common::auth::generate_opaque_token;
use asesoria_common::AppError;
use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Credentials handed out on login and refresh
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds
    pub expires_in: i64,
}

/// Session manager
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a fresh token pair for a user.
    ///
    /// The only side effect is the single inserted refresh-token row.
    #[instrument(skip(self))]
    pub async fn issue_session(&self, user_id: i64) -> ServiceResult<SessionTokens> {
        let access_token = self
            .ctx
            .jwt_service()
            .generate_access_token(user_id)
            .map_err(ServiceError::from)?;

        let refresh_token = generate_opaque_token();
        let expires_at = Utc::now() + Duration::seconds(self.ctx.refresh_token_expiry());

        self.ctx
            .refresh_token_repo()
            .insert(user_id, &refresh_token, expires_at)
            .await?;

        Ok(SessionTokens {
            access_token,
            refresh_token,
            expires_in: self.ctx.jwt_service().access_token_expiry(),
        })
    }

    /// Redeem a refresh token and rotate it.
    ///
    /// Redemption is a single atomic delete: of two concurrent calls with
    /// the same token exactly one gets the row, the other fails with an
    /// authentication error. A found-but-expired token was already deleted
    /// by the same statement, which is the ledger's cleanup path.
    #[instrument(skip(self, presented))]
    pub async fn refresh_session(&self, presented: &str) -> ServiceResult<SessionTokens> {
        let redeemed = self
            .ctx
            .refresh_token_repo()
            .redeem(presented)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        if redeemed.expires_at <= Utc::now() {
            warn!(user_id = redeemed.user_id, "Expired refresh token presented");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        let tokens = self.issue_session(redeemed.user_id).await?;
        info!(user_id = redeemed.user_id, "Refresh token rotated");
        Ok(tokens)
    }

    /// Delete every refresh token the user holds. Used on logout and on
    /// password change/reset to invalidate all other active sessions.
    #[instrument(skip(self))]
    pub async fn revoke_all_sessions(&self, user_id: i64) -> ServiceResult<u64> {
        let revoked = self
            .ctx
            .refresh_token_repo()
            .delete_all_for_user(user_id)
            .await?;

        info!(user_id, revoked, "Revoked all sessions");
        Ok(revoked)
    }

    /// Delete all expired refresh tokens. Driven by a recurring timer task;
    /// failures are logged by the caller and never fatal.
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self) -> ServiceResult<u64> {
        let swept = self.ctx.refresh_token_repo().delete_expired().await?;
        if swept > 0 {
            info!(swept, "Expired refresh tokens cleaned up");
        }
        Ok(swept)
    }
}
