//! Verification mailer that writes the e-mail to the log
//!
//! Stands in for a transport in environments without one.

use async_trait::async_trait;
use matchday_core::entities::User;
use matchday_core::traits::{RepoResult, VerificationMailer};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl VerificationMailer for LogMailer {
    async fn send_verification(&self, user: &User) -> RepoResult<()> {
        info!(user_id = %user.id, email = %user.email, "Verification e-mail queued");
        Ok(())
    }
}
