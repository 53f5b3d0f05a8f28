//! Refresh token record <-> model mapper

use matchday_core::entities::RefreshTokenRecord;
use matchday_core::value_objects::UserId;

use crate::models::RefreshTokenModel;

impl From<RefreshTokenModel> for RefreshTokenRecord {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshTokenRecord {
            user_id: UserId::new(model.user_id),
            token: model.token,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
