//! Service-to-service handlers, gated by internal access tokens

use axum::extract::State;
use matchday_common::messages::codes;
use matchday_service::{dto::RevokedSessionsResponse, AccountService};
use tracing::info;

use crate::extractors::{InternalCaller, UserIdPath};
use crate::response::{ApiResult, ApiSuccess};
use crate::state::AppState;

/// POST /internal/users/{user_id}/revoke-sessions
pub async fn revoke_sessions(
    State(state): State<AppState>,
    InternalCaller(caller): InternalCaller,
    UserIdPath(target): UserIdPath,
) -> ApiResult<ApiSuccess<RevokedSessionsResponse>> {
    let revoked = AccountService::new(state.service_context())
        .revoke_sessions(target)
        .await?;
    info!(service = %caller.sub, user_id = %target, revoked, "Internal session revocation");
    Ok(ApiSuccess::new(
        codes::SESSIONS_REVOKED,
        RevokedSessionsResponse {
            user_id: target,
            revoked,
        },
    ))
}
