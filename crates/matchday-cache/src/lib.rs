//! # matchday-cache
//!
//! Redis-backed shared state of the session core.
//!
//! - **Connection Pool**: managed Redis connection pool with deadpool
//! - **Cache Port**: the [`CacheStore`] trait, implemented by [`RedisPool`]
//! - **Rate Limiter**: per-operation, per-client request counters
//! - **Login Cooldown**: resend-verification throttle per e-mail address
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use matchday_cache::{CacheStore, RateLimitedOperation, RateLimiter, RedisPool, RedisPoolConfig};
//!
//! let store: Arc<dyn CacheStore> = Arc::new(RedisPool::new(RedisPoolConfig::default())?);
//! let limiter = RateLimiter::new(store, config.rate_limit.clone());
//! let decision = limiter.check(RateLimitedOperation::Login, "203.0.113.7").await?;
//! ```

pub mod pool;
pub mod rate_limit;
pub mod store;

// Re-export pool types
pub use pool::{CacheError, CacheResult, RedisPool, RedisPoolConfig};

pub use rate_limit::{
    CooldownState, LoginCooldown, RateLimitDecision, RateLimitError, RateLimitedOperation,
    RateLimiter,
};
pub use store::CacheStore;
