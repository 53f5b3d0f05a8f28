//! User entity - a registered player or organizer

use chrono::{DateTime, Utc};

use crate::value_objects::{AccessFlags, UserId};

/// User entity representing a player account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub is_admin: bool,
    pub has_access: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, unverified user without any privileges
    pub fn new(id: UserId, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            is_admin: false,
            has_access: false,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current authorization flags of this user
    #[inline]
    pub fn flags(&self) -> AccessFlags {
        AccessFlags::new(self.is_admin, self.has_access)
    }

    /// Check if the e-mail address was confirmed
    #[inline]
    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Replace the authorization flags
    pub fn set_flags(&mut self, flags: AccessFlags) {
        self.is_admin = flags.is_admin;
        self.has_access = flags.has_access;
        self.updated_at = Utc::now();
    }

    /// Mark the e-mail address as confirmed
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }
}
