//! # matchday-core
//!
//! Domain layer containing entities, value objects and the ports (repository and
//! mailer traits) the rest of the workspace plugs into.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{RefreshTokenRecord, User};
pub use error::DomainError;
pub use traits::{RefreshTokenRepository, RepoResult, UserRepository, VerificationMailer};
pub use value_objects::{AccessFlags, UserId, UserIdParseError};
