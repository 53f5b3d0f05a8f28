//! Service context - dependency container for services
//!
//! Holds the repositories, the cache port, token codecs and throttles the
//! services need. Everything behind a port is an `Arc<dyn Trait>` so tests can
//! swap in memory implementations.

use std::sync::Arc;

use chrono::Duration;
use matchday_cache::{
    CacheStore, LoginCooldown, RateLimitDecision, RateLimitedOperation, RateLimiter,
};
use matchday_common::{
    AppConfig, AppError, InternalTokenCodec, PasswordService, RequestMetadata, TokenCodec,
};
use matchday_core::traits::{RefreshTokenRepository, UserRepository, VerificationMailer};

use super::error::{ServiceError, ServiceResult};
use super::health::DatabaseProbe;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,

    // Outbound ports
    cache: Arc<dyn CacheStore>,
    mailer: Arc<dyn VerificationMailer>,
    database_probe: Arc<dyn DatabaseProbe>,

    // Security primitives
    token_codec: Arc<TokenCodec>,
    internal_token_codec: Arc<InternalTokenCodec>,
    password_service: PasswordService,
    refresh_token_ttl: Duration,

    // Throttles
    rate_limiter: RateLimiter,
    login_cooldown: LoginCooldown,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the refresh token repository
    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    // === Ports ===

    /// Get the shared cache
    pub fn cache(&self) -> &dyn CacheStore {
        self.cache.as_ref()
    }

    /// Get the verification mailer
    pub fn mailer(&self) -> &dyn VerificationMailer {
        self.mailer.as_ref()
    }

    pub fn database_probe(&self) -> &dyn DatabaseProbe {
        self.database_probe.as_ref()
    }

    // === Security ===

    /// Get the access token codec
    pub fn token_codec(&self) -> &TokenCodec {
        self.token_codec.as_ref()
    }

    /// Get the internal service token codec
    pub fn internal_token_codec(&self) -> &InternalTokenCodec {
        self.internal_token_codec.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Lifetime of a refresh token
    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }

    // === Throttles ===

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    pub fn login_cooldown(&self) -> &LoginCooldown {
        &self.login_cooldown
    }

    /// Count one hit of `operation` for the requesting client.
    ///
    /// # Errors
    /// `RateLimitExceeded` when over the threshold, `ClientIpUnknown` when the
    /// request has no client address, `Cache` when the counter store fails
    pub async fn enforce_rate_limit(
        &self,
        operation: RateLimitedOperation,
        meta: &RequestMetadata,
    ) -> ServiceResult<()> {
        match self.rate_limiter.check_request(operation, meta).await? {
            RateLimitDecision::Allowed { .. } => Ok(()),
            RateLimitDecision::Denied { retry_after } => {
                Err(ServiceError::App(AppError::RateLimitExceeded { retry_after }))
            }
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("token_codec", &self.token_codec)
            .field("rate_limiter", &self.rate_limiter)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    config: Option<Arc<AppConfig>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    cache: Option<Arc<dyn CacheStore>>,
    mailer: Option<Arc<dyn VerificationMailer>>,
    database_probe: Option<Arc<dyn DatabaseProbe>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Application config; supplies secrets, lifetimes and thresholds
    pub fn config(mut self, config: Arc<AppConfig>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    pub fn cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn VerificationMailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn database_probe(mut self, probe: Arc<dyn DatabaseProbe>) -> Self {
        self.database_probe = Some(probe);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let config = self
            .config
            .ok_or_else(|| ServiceError::validation("config is required"))?;
        let cache = self
            .cache
            .ok_or_else(|| ServiceError::validation("cache is required"))?;

        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            refresh_token_repo: self
                .refresh_token_repo
                .ok_or_else(|| ServiceError::validation("refresh_token_repo is required"))?,
            mailer: self
                .mailer
                .ok_or_else(|| ServiceError::validation("mailer is required"))?,
            database_probe: self
                .database_probe
                .ok_or_else(|| ServiceError::validation("database_probe is required"))?,
            token_codec: Arc::new(TokenCodec::new(
                &config.jwt.secret,
                config.jwt.access_token_expiry,
            )),
            internal_token_codec: Arc::new(InternalTokenCodec::new(
                &config.jwt.secret,
                config.jwt.internal_token_expiry,
            )),
            password_service: PasswordService::new(),
            refresh_token_ttl: Duration::seconds(config.jwt.refresh_token_expiry),
            rate_limiter: RateLimiter::new(cache.clone(), config.rate_limit.clone()),
            login_cooldown: LoginCooldown::new(cache.clone(), config.rate_limit.login_cooldown_secs),
            cache,
        })
    }
}
