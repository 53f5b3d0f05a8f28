//! Refresh store adapter
//!
//! Every user owns at most one refresh token. Issuing a new one overwrites the
//! old slot, so concurrent logins leave exactly one surviving session.

use chrono::{DateTime, Utc};
use matchday_common::{generate_opaque_token, AppError};
use matchday_core::entities::RefreshTokenRecord;
use matchday_core::value_objects::UserId;
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct RefreshTokenService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RefreshTokenService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Generate a fresh opaque token and store it in the user's slot
    pub async fn issue_or_rotate(&self, user_id: UserId) -> ServiceResult<String> {
        self.issue_or_rotate_at(user_id, Utc::now()).await
    }

    #[instrument(skip(self, now))]
    pub async fn issue_or_rotate_at(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let record = RefreshTokenRecord::new(
            user_id,
            generate_opaque_token(),
            now,
            self.ctx.refresh_token_ttl(),
        );

        self.ctx.refresh_token_repo().upsert_for_user(&record).await?;
        debug!(expires_at = %record.expires_at, "Refresh token rotated");

        Ok(record.token)
    }

    /// Resolve a token to its owner
    ///
    /// An expired token's slot is deleted on the way out.
    ///
    /// # Errors
    /// `InvalidRefreshToken` when the token is unknown or expired
    pub async fn lookup(&self, token: &str) -> ServiceResult<UserId> {
        self.lookup_at(token, Utc::now()).await
    }

    #[instrument(skip_all)]
    pub async fn lookup_at(&self, token: &str, now: DateTime<Utc>) -> ServiceResult<UserId> {
        let record = self
            .ctx
            .refresh_token_repo()
            .find_by_token(token)
            .await?
            .ok_or_else(|| {
                warn!("Refresh token not found");
                ServiceError::App(AppError::InvalidRefreshToken)
            })?;

        if record.is_expired_at(now) {
            warn!(user_id = %record.user_id, "Refresh token expired");
            self.ctx
                .refresh_token_repo()
                .delete_for_user(record.user_id)
                .await?;
            return Err(ServiceError::App(AppError::InvalidRefreshToken));
        }

        Ok(record.user_id)
    }

    /// Delete every refresh token of the user, returning how many existed
    #[instrument(skip(self))]
    pub async fn revoke(&self, user_id: UserId) -> ServiceResult<u64> {
        Ok(self.ctx.refresh_token_repo().delete_for_user(user_id).await?)
    }
}
