//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names are
//! camelCase for the browser client.

use chrono::{DateTime, TimeZone, Utc};
use matchday_core::entities::User;
use matchday_core::value_objects::{AccessFlags, UserId};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// Account as seen by its owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub is_admin: bool,
    pub has_access: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_admin: user.is_admin,
            has_access: user.has_access,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

/// Identity resolved from the access token alone
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: UserId,
    pub is_admin: bool,
    pub has_access: bool,
    pub token_expires_at: Option<DateTime<Utc>>,
}

impl CurrentUserResponse {
    pub fn from_claims(id: UserId, flags: AccessFlags, expires_at: i64) -> Self {
        Self {
            id,
            is_admin: flags.is_admin,
            has_access: flags.has_access,
            token_expires_at: Utc.timestamp_opt(expires_at, 0).single(),
        }
    }
}

// ============================================================================
// Session Responses
// ============================================================================

/// State of the caller's session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: UserId,
    pub is_admin: bool,
    pub has_access: bool,
    pub expires_at: Option<DateTime<Utc>>,
    /// A new access token was issued from the refresh token
    pub refreshed: bool,
}

/// Outcome of an admin or internal revocation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokedSessionsResponse {
    pub user_id: UserId,
    pub revoked: u64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub cache: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, cache_healthy: bool) -> Self {
        let all_healthy = database_healthy && cache_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                cache: if cache_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
