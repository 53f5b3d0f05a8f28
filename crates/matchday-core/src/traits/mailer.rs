//! Outbound e-mail port

use async_trait::async_trait;

use crate::entities::User;

use super::repositories::RepoResult;

/// Sends account verification e-mails.
///
/// Templates and transport are owned by the implementation.
#[async_trait]
pub trait VerificationMailer: Send + Sync {
    /// Send (or re-send) the verification e-mail for `user`
    async fn send_verification(&self, user: &User) -> RepoResult<()>;
}
