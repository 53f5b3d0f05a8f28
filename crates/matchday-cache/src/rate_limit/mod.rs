//! Abuse throttles backed by the shared cache

mod cooldown;
mod limiter;

pub use cooldown::{CooldownState, LoginCooldown};
pub use limiter::{RateLimitDecision, RateLimitError, RateLimitedOperation, RateLimiter};
