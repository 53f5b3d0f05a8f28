//! # matchday-db
//!
//! Database layer implementing the repository traits of `matchday-core` with
//! PostgreSQL via SQLx.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use matchday_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use matchday_db::repositories::PgUserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgRefreshTokenRepository, PgUserRepository};
