//! # matchday-common
//!
//! Shared utilities: configuration, error handling, the message catalog,
//! telemetry, and the security primitives of the session core (request
//! fingerprints, token codecs, password hashing, opaque tokens).

pub mod auth;
pub mod config;
pub mod error;
pub mod messages;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    fingerprint, generate_opaque_token, hash_password, validate_password_strength,
    verify_password, AccessTokenClaims, InternalTokenClaims, InternalTokenCodec,
    PasswordService, RequestMetadata, TokenCodec, TokenError, TokenType, VerifiedToken,
    UNKNOWN_IP,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, RedisConfig, ServerConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use messages::{t, EnglishCatalog, MessageCatalog};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
