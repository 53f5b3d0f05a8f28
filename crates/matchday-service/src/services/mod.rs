//! Business logic services
//!
//! Services borrow the shared [`ServiceContext`] per call and orchestrate
//! repositories, the cache and the token codecs.

pub mod account;
pub mod context;
pub mod error;
pub mod health;
pub mod mailer;
pub mod refresh_token;
pub mod session;


pub use account::AccountService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::{DatabaseProbe, HealthService};
pub use mailer::LogMailer;
pub use refresh_token::RefreshTokenService;
pub use session::{
    AuthenticatedSession, LoginOutcome, LogoutOutcome, SessionService, SessionState,
    SessionTokens,
};
