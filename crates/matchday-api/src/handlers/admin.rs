//! Administrative handlers
//!
//! Gated on the `is_admin` claim of the caller's access token.

use axum::extract::State;
use matchday_common::messages::codes;
use matchday_service::{dto::RevokedSessionsResponse, AccountService};
use tracing::info;

use crate::extractors::{AdminUser, ClientMeta, UserIdPath};
use crate::response::{ApiResult, ApiSuccess};
use crate::state::AppState;

/// Delete a user and everything that references it
///
/// DELETE /admin/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    AdminUser(admin): AdminUser,
    UserIdPath(target): UserIdPath,
) -> ApiResult<ApiSuccess<()>> {
    AccountService::new(state.service_context())
        .purge_user(admin.user_id, target, &meta)
        .await?;
    info!(admin_id = %admin.user_id, user_id = %target, "Admin deleted user");
    Ok(ApiSuccess::message(codes::USER_DELETED))
}

/// Revoke all sessions of a user
///
/// DELETE /admin/users/{user_id}/sessions
pub async fn revoke_sessions(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    AdminUser(admin): AdminUser,
    UserIdPath(target): UserIdPath,
) -> ApiResult<ApiSuccess<RevokedSessionsResponse>> {
    let revoked = AccountService::new(state.service_context())
        .admin_revoke_sessions(target, &meta)
        .await?;
    info!(admin_id = %admin.user_id, user_id = %target, revoked, "Admin revoked sessions");
    Ok(ApiSuccess::new(
        codes::SESSIONS_REVOKED,
        RevokedSessionsResponse {
            user_id: target,
            revoked,
        },
    ))
}
