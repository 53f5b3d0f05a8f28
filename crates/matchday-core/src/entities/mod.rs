//! Domain entities - core business objects

mod refresh_token;
mod user;

pub use refresh_token::RefreshTokenRecord;
pub use user::User;
