//! Resend-verification cooldown keyed by e-mail address
//!
//! A plain marker, not a counter: while the marker lives, no further
//! verification e-mail is sent for the address.

use std::sync::Arc;

use chrono::Utc;

use crate::pool::CacheResult;
use crate::store::CacheStore;

/// Key prefix for cooldown markers
const COOLDOWN_PREFIX: &str = "login_cooldown:";

/// Result of claiming the cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownState {
    /// The marker was set; the caller may send the e-mail
    Ready { remaining_secs: u64 },
    /// A marker is still live
    Cooling { remaining_secs: u64 },
}

impl CooldownState {
    #[must_use]
    pub fn remaining_secs(&self) -> u64 {
        match self {
            Self::Ready { remaining_secs } | Self::Cooling { remaining_secs } => *remaining_secs,
        }
    }
}

#[derive(Clone)]
pub struct LoginCooldown {
    store: Arc<dyn CacheStore>,
    cooldown_secs: u64,
}

impl std::fmt::Debug for LoginCooldown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCooldown")
            .field("cooldown_secs", &self.cooldown_secs)
            .finish_non_exhaustive()
    }
}

impl LoginCooldown {
    pub fn new(store: Arc<dyn CacheStore>, cooldown_secs: u64) -> Self {
        Self {
            store,
            cooldown_secs,
        }
    }

    fn key(email: &str) -> String {
        format!("{COOLDOWN_PREFIX}{}", email.trim().to_lowercase())
    }

    /// Claim the cooldown for `email` as of now
    pub async fn claim(&self, email: &str) -> CacheResult<CooldownState> {
        self.claim_at(email, Utc::now().timestamp()).await
    }

    /// Claim the cooldown as of the Unix timestamp `now`.
    ///
    /// The stored value is the absolute expiry timestamp, so the remaining
    /// time can be reported without a TTL query.
    pub async fn claim_at(&self, email: &str, now: i64) -> CacheResult<CooldownState> {
        let key = Self::key(email);

        if let Some(raw) = self.store.get(&key).await? {
            if let Ok(expires_at) = raw.parse::<i64>() {
                if expires_at > now {
                    return Ok(CooldownState::Cooling {
                        remaining_secs: (expires_at - now) as u64,
                    });
                }
            }
        }

        let expires_at = now + self.cooldown_secs as i64;
        self.store
            .set(&key, &expires_at.to_string(), self.cooldown_secs)
            .await?;

        Ok(CooldownState::Ready {
            remaining_secs: self.cooldown_secs,
        })
    }

    /// Drop the marker for `email` so the next claim is `Ready` again.
    ///
    /// Used when the e-mail the claim allowed could not be sent.
    pub async fn release(&self, email: &str) -> CacheResult<bool> {
        self.store.delete(&Self::key(email)).await
    }
}
