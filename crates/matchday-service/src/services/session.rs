//! Session lifecycle: login, verification, refresh and logout
//!
//! A session is a pair of credentials. The access token is a short-lived,
//! fingerprint-bound JWT that the request gate trusts without touching the
//! store. The refresh token is an opaque value in the user's single store
//! slot; exchanging it is the only point where changed authorization flags
//! reach a new access token.

use chrono::Utc;
use matchday_cache::{CooldownState, RateLimitedOperation};
use matchday_common::{generate_opaque_token, AppError, RequestMetadata, VerifiedToken};
use matchday_core::entities::User;
use matchday_core::value_objects::{AccessFlags, UserId};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::{normalize_email, LoginRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::refresh_token::RefreshTokenService;

/// Credentials produced by a successful login
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub csrf_token: String,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub tokens: SessionTokens,
}

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub user_id: UserId,
    pub flags: AccessFlags,
    pub expires_at: i64,
    /// Set when the session was re-established from the refresh token
    pub new_access_token: Option<String>,
}

impl AuthenticatedSession {
    fn from_verified(token: VerifiedToken) -> Self {
        Self {
            user_id: token.user_id,
            flags: token.flags,
            expires_at: token.expires_at,
            new_access_token: None,
        }
    }
}

/// Outcome of a session probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Authenticated(AuthenticatedSession),
    Unauthenticated,
}

/// Result of a logout; cookies are cleared either way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub user_id: Option<UserId>,
}

impl LogoutOutcome {
    pub fn session_existed(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn refresh_tokens(&self) -> RefreshTokenService<'a> {
        RefreshTokenService::new(self.ctx)
    }

    /// Authenticate with e-mail and password.
    ///
    /// The rate limit is checked before any credential lookup. Unknown
    /// e-mail and wrong password fail identically with `InvalidCredentials`.
    #[instrument(skip(self, request, meta))]
    pub async fn login(
        &self,
        request: &LoginRequest,
        meta: &RequestMetadata,
    ) -> ServiceResult<LoginOutcome> {
        self.ctx
            .enforce_rate_limit(RateLimitedOperation::Login, meta)
            .await?;

        request.validate()?;
        let email = normalize_email(&request.email);

        let Some(user) = self.ctx.user_repo().find_by_email(&email).await? else {
            self.ctx.password_service().verify_decoy(&request.password);
            warn!("Login failed: unknown e-mail");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        };

        if !user.is_verified() {
            return Err(self.resend_verification(&user).await);
        }

        let password_hash = self.ctx.user_repo().get_password_hash(user.id).await?;
        self.ctx
            .password_service()
            .verify_or_error(&request.password, password_hash.as_deref())
            .map_err(|e| {
                warn!(user_id = %user.id, "Login failed: invalid password");
                ServiceError::App(e)
            })?;

        let access_token = self.ctx.token_codec().issue(user.id, user.flags(), meta)?;
        let refresh_token = self.refresh_tokens().issue_or_rotate(user.id).await?;
        let csrf_token = generate_opaque_token();

        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            tokens: SessionTokens {
                access_token,
                refresh_token,
                csrf_token,
            },
        })
    }

    /// Resend the verification e-mail at most once per cooldown window and
    /// build the error the login reports
    async fn resend_verification(&self, user: &User) -> ServiceError {
        let state = match self.ctx.login_cooldown().claim(&user.email).await {
            Ok(state) => state,
            Err(e) => return ServiceError::from(e),
        };

        if let CooldownState::Ready { .. } = state {
            if let Err(e) = self.ctx.mailer().send_verification(user).await {
                warn!(user_id = %user.id, error = %e, "Verification e-mail failed");
                if let Err(e) = self.ctx.login_cooldown().release(&user.email).await {
                    warn!(user_id = %user.id, error = %e, "Could not release login cooldown");
                }
                return ServiceError::App(AppError::ExternalService(
                    "verification mailer".to_string(),
                ));
            }
            info!(user_id = %user.id, "Verification e-mail re-sent");
        } else {
            debug!(user_id = %user.id, "Verification e-mail throttled");
        }

        ServiceError::App(AppError::AccountNotVerified {
            remaining_time: state.remaining_secs(),
        })
    }

    /// Check an access token against the current request
    pub fn verify_auth(&self, access_token: &str, meta: &RequestMetadata) -> SessionState {
        match self.ctx.token_codec().verify(access_token, meta) {
            Ok(verified) => SessionState::Authenticated(AuthenticatedSession::from_verified(verified)),
            Err(e) => {
                debug!(error = %e, "Access token rejected");
                SessionState::Unauthenticated
            }
        }
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Flags are re-read from the store. The refresh token itself is not
    /// rotated.
    ///
    /// # Errors
    /// `InvalidRefreshToken` when the token is unknown or expired, or its
    /// user no longer exists
    #[instrument(skip_all)]
    pub async fn refresh_auth(
        &self,
        refresh_token: &str,
        meta: &RequestMetadata,
    ) -> ServiceResult<AuthenticatedSession> {
        let user_id = self.refresh_tokens().lookup(refresh_token).await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Refresh token owner no longer exists");
                ServiceError::App(AppError::InvalidRefreshToken)
            })?;

        let flags = user.flags();
        let now = Utc::now().timestamp();
        let access_token = self.ctx.token_codec().issue_at(user.id, flags, meta, now)?;
        let expires_at = now + self.ctx.token_codec().access_token_expiry();

        info!(user_id = %user.id, "Access token refreshed");

        Ok(AuthenticatedSession {
            user_id: user.id,
            flags,
            expires_at,
            new_access_token: Some(access_token),
        })
    }

    /// Rate-limited `refresh_auth` for the explicit refresh endpoint
    pub async fn refresh(
        &self,
        refresh_token: Option<&str>,
        meta: &RequestMetadata,
    ) -> ServiceResult<AuthenticatedSession> {
        self.ctx
            .enforce_rate_limit(RateLimitedOperation::Refresh, meta)
            .await?;

        let token = refresh_token.ok_or(ServiceError::App(AppError::InvalidRefreshToken))?;
        self.refresh_auth(token, meta).await
    }

    /// Accept a valid access token, else fall back to the refresh token.
    ///
    /// Authentication failures end in `Unauthenticated`; store failures are
    /// returned as errors.
    pub async fn verify_or_refresh(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        meta: &RequestMetadata,
    ) -> ServiceResult<SessionState> {
        if let Some(token) = access_token {
            if let state @ SessionState::Authenticated(_) = self.verify_auth(token, meta) {
                return Ok(state);
            }
        }

        let Some(refresh_token) = refresh_token else {
            return Ok(SessionState::Unauthenticated);
        };

        match self.refresh_auth(refresh_token, meta).await {
            Ok(session) => Ok(SessionState::Authenticated(session)),
            Err(e) if e.is_app(AppError::is_unauthorized) => Ok(SessionState::Unauthenticated),
            Err(e) => Err(e),
        }
    }

    /// End the caller's session.
    ///
    /// The subject comes from the access token, or from the refresh token
    /// when the access token no longer verifies. If neither identifies a
    /// user the session is reported as already absent.
    #[instrument(skip_all)]
    pub async fn logout(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        meta: &RequestMetadata,
    ) -> ServiceResult<LogoutOutcome> {
        self.ctx
            .enforce_rate_limit(RateLimitedOperation::Mutation, meta)
            .await?;

        let mut subject = access_token
            .and_then(|token| self.ctx.token_codec().verify(token, meta).ok())
            .map(|verified| verified.user_id);

        if subject.is_none() {
            if let Some(token) = refresh_token {
                match self.refresh_tokens().lookup(token).await {
                    Ok(user_id) => subject = Some(user_id),
                    Err(e) if e.is_app(AppError::is_unauthorized) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        if let Some(user_id) = subject {
            self.refresh_tokens().revoke(user_id).await?;
            info!(user_id = %user_id, "User logged out");
        } else {
            debug!("Logout without a live session");
        }

        Ok(LogoutOutcome { user_id: subject })
    }
}
