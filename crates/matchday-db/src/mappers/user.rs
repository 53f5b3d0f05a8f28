//! User entity <-> model mapper

use matchday_core::entities::User;
use matchday_core::value_objects::UserId;
use uuid::Uuid;

use crate::models::UserModel;

/// Convert UserModel to User entity; the password hash stays behind
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            email: model.email,
            is_admin: model.is_admin,
            has_access: model.has_access,
            is_verified: model.is_verified,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Borrowed column values for inserting a user
pub struct UserInsert<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_admin: bool,
    pub has_access: bool,
    pub is_verified: bool,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id.into_inner(),
            email: &user.email,
            password_hash,
            is_admin: user.is_admin,
            has_access: user.has_access,
            is_verified: user.is_verified,
        }
    }
}
