//! Security primitives: fingerprints, token codecs, passwords, opaque tokens

mod fingerprint;
mod jwt;
mod opaque;
mod password;
mod request_meta;

pub use fingerprint::fingerprint;
pub use jwt::{
    AccessTokenClaims, InternalTokenClaims, InternalTokenCodec, TokenCodec, TokenError,
    TokenType, VerifiedToken,
};
pub use opaque::{generate_opaque_token, OPAQUE_TOKEN_BYTES};
pub use password::{
    hash_password, validate_password_strength, verify_password, PasswordService,
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use request_meta::{RequestMetadata, UNKNOWN_IP};
