//! Value objects - immutable domain primitives

mod access_flags;
mod user_id;

pub use access_flags::AccessFlags;
pub use user_id::{UserId, UserIdParseError};
