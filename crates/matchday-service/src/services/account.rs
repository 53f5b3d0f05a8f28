//! Account lifecycle: registration and administrative removal

use matchday_cache::RateLimitedOperation;
use matchday_common::{validate_password_strength, AppError, RequestMetadata};
use matchday_core::entities::User;
use matchday_core::error::DomainError;
use matchday_core::value_objects::UserId;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{normalize_email, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::refresh_token::RefreshTokenService;

pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an unverified account without privileges and send the
    /// verification e-mail.
    ///
    /// A failed e-mail does not undo the registration; the next login
    /// attempt re-sends it.
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        request: &RegisterRequest,
        meta: &RequestMetadata,
    ) -> ServiceResult<User> {
        self.ctx
            .enforce_rate_limit(RateLimitedOperation::Register, meta)
            .await?;

        request.validate()?;
        validate_password_strength(&request.password).map_err(|e| match e {
            AppError::Validation(msg) => ServiceError::Domain(DomainError::WeakPassword(msg)),
            other => ServiceError::App(other),
        })?;

        let email = normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let user = User::new(UserId::generate(), email);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        if let Err(e) = self.ctx.mailer().send_verification(&user).await {
            warn!(user_id = %user.id, error = %e, "Verification e-mail failed after registration");
        }

        Ok(user)
    }

    /// Revoke every session of `target`
    #[instrument(skip(self))]
    pub async fn revoke_sessions(&self, target: UserId) -> ServiceResult<u64> {
        let revoked = RefreshTokenService::new(self.ctx).revoke(target).await?;
        info!(revoked, "Sessions revoked");
        Ok(revoked)
    }

    /// Rate-limited session revocation on behalf of an administrator
    pub async fn admin_revoke_sessions(
        &self,
        target: UserId,
        meta: &RequestMetadata,
    ) -> ServiceResult<u64> {
        self.ctx
            .enforce_rate_limit(RateLimitedOperation::Mutation, meta)
            .await?;
        self.revoke_sessions(target).await
    }

    /// Delete `target` and everything hanging off it.
    ///
    /// Refresh tokens are revoked first; the remaining dependent rows go
    /// through the store's cascades. Administrators cannot purge
    /// themselves.
    #[instrument(skip(self, meta))]
    pub async fn purge_user(
        &self,
        actor: UserId,
        target: UserId,
        meta: &RequestMetadata,
    ) -> ServiceResult<()> {
        self.ctx
            .enforce_rate_limit(RateLimitedOperation::Mutation, meta)
            .await?;

        if actor == target {
            return Err(ServiceError::validation(
                "administrators cannot delete their own account",
            ));
        }

        if self.ctx.user_repo().find_by_id(target).await?.is_none() {
            return Err(DomainError::UserNotFound(target).into());
        }

        RefreshTokenService::new(self.ctx).revoke(target).await?;
        self.ctx.user_repo().delete(target).await?;

        info!(user_id = %target, "User purged");
        Ok(())
    }
}
