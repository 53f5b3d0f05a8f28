//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{RefreshTokenRecord, User};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Delete a user; dependent rows go with it through the store's cascades
    async fn delete(&self, id: UserId) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert the record, or overwrite the existing record of the same user.
    ///
    /// Concurrent upserts for one user are last-write-wins.
    async fn upsert_for_user(&self, record: &RefreshTokenRecord) -> RepoResult<()>;

    /// Find a record by its opaque token value
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshTokenRecord>>;

    /// Delete every record of a user, returning how many were removed
    async fn delete_for_user(&self, user_id: UserId) -> RepoResult<u64>;
}
