//! Ports implemented by the infrastructure crates

mod mailer;
mod repositories;

pub use mailer::VerificationMailer;
pub use repositories::{RefreshTokenRepository, RepoResult, UserRepository};
