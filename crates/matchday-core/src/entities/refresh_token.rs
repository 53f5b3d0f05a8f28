//! Refresh token record - the single persisted session slot of a user

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::UserId;

/// Persisted refresh token. At most one record exists per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub user_id: UserId,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Create a record issued at `now` that lives for `ttl`
    pub fn new(user_id: UserId, token: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            token,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// Check if the record is expired at the given instant
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
