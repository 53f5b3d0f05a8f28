//! Per-operation request counter keyed by client address

use std::fmt;
use std::sync::Arc;

use matchday_common::{RateLimitConfig, RequestMetadata};

use crate::pool::{CacheError, CacheResult};
use crate::store::CacheStore;

/// Key prefix for rate limit counters
const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// Operations with their own threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitedOperation {
    Login,
    Register,
    Refresh,
    /// Logout and admin mutations
    Mutation,
}

impl RateLimitedOperation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Refresh => "refresh",
            Self::Mutation => "mutation",
        }
    }
}

impl fmt::Display for RateLimitedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a limiter check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Denied { retry_after: u64 },
}

impl RateLimitDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Errors from a request-level check
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("client address could not be determined")]
    ClientIpUnknown,

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Counter-based limiter over the shared cache.
///
/// Each allowed hit rewrites the counter with a fresh window TTL, so the
/// window renews from the most recent allowed request. Denied hits write
/// nothing.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CacheStore>,
    config: RateLimitConfig,
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CacheStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    /// Requests allowed per window for `operation`
    #[must_use]
    pub fn threshold(&self, operation: RateLimitedOperation) -> u32 {
        match operation {
            RateLimitedOperation::Login => self.config.login,
            RateLimitedOperation::Register => self.config.register,
            RateLimitedOperation::Refresh => self.config.refresh,
            RateLimitedOperation::Mutation => self.config.mutation,
        }
    }

    fn key(operation: RateLimitedOperation, client_id: &str) -> String {
        format!("{RATE_LIMIT_PREFIX}{operation}:{client_id}")
    }

    /// Count one hit of `operation` by `client_id`
    pub async fn check(
        &self,
        operation: RateLimitedOperation,
        client_id: &str,
    ) -> CacheResult<RateLimitDecision> {
        let key = Self::key(operation, client_id);
        let threshold = self.threshold(operation);

        let count = match self.store.get(&key).await? {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| CacheError::InvalidValue {
                    key: key.clone(),
                    value: raw,
                })?,
            None => 0,
        };

        if count.saturating_add(1) > threshold {
            tracing::warn!(%operation, client = %client_id, count, "Rate limit exceeded");
            return Ok(RateLimitDecision::Denied {
                retry_after: self.config.window_secs,
            });
        }

        let next = count + 1;
        self.store
            .set(&key, &next.to_string(), self.config.window_secs)
            .await?;

        Ok(RateLimitDecision::Allowed {
            remaining: threshold - next,
        })
    }

    /// Count one hit for the client behind `meta`.
    ///
    /// Fails closed when the request carries no client address.
    pub async fn check_request(
        &self,
        operation: RateLimitedOperation,
        meta: &RequestMetadata,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let client_id = meta.client_id().ok_or(RateLimitError::ClientIpUnknown)?;
        Ok(self.check(operation, client_id).await?)
    }
}
