//! User handlers

use matchday_common::messages::codes;
use matchday_service::dto::CurrentUserResponse;

use crate::extractors::AuthUser;
use crate::response::ApiSuccess;

/// Identity and flags of the caller, straight from the access token
///
/// GET /users/@me
pub async fn get_current_user(user: AuthUser) -> ApiSuccess<CurrentUserResponse> {
    ApiSuccess::new(
        codes::PROFILE,
        CurrentUserResponse::from_claims(user.user_id, user.flags, user.expires_at),
    )
}
