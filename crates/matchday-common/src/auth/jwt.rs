//! JWT codecs for authentication
//!
//! Two token kinds share one HMAC-SHA256 secret:
//! - user access tokens, bound to the fingerprint of the issuing request
//! - internal service tokens, unbound, discriminated by `type = "access"`

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use matchday_core::{AccessFlags, UserId};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fingerprint::fingerprint;
use super::request_meta::RequestMetadata;

/// Token verification failures, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    TokenExpired,

    #[error("token fingerprint does not match the request")]
    FingerprintMismatch,

    #[error("token is malformed")]
    Malformed,

    #[error("token has the wrong type")]
    WrongTokenType,

    #[error("failed to encode token")]
    Encoding,
}

/// Discriminator of internal service tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    #[serde(other)]
    Unknown,
}

/// Claims of a user access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Fingerprint of the issuing request
    pub fgp: String,
    #[serde(flatten)]
    pub flags: AccessFlags,
}

/// Claims of an internal service token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalTokenClaims {
    /// Calling service name
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

/// A successfully verified user access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: UserId,
    pub flags: AccessFlags,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Signing material shared by both codecs
#[derive(Clone)]
struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    fn new(secret: &str) -> Self {
        // Expiry is checked by hand against an explicit clock, and a missing
        // `exp` must surface as an expiry failure rather than a decode error.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| TokenError::Encoding)
    }

    /// Steps 1 and 2: signature, then `now < exp`
    fn open(&self, token: &str, now: i64) -> Result<Map<String, Value>, TokenError> {
        let data = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::Malformed,
            })?;

        let exp = data
            .claims
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or(TokenError::TokenExpired)?;
        if now >= exp {
            return Err(TokenError::TokenExpired);
        }

        Ok(data.claims)
    }

    fn parse<T: DeserializeOwned>(claims: Map<String, Value>) -> Result<T, TokenError> {
        serde_json::from_value(Value::Object(claims)).map_err(|_| TokenError::Malformed)
    }
}

/// Codec for fingerprint-bound user access tokens
#[derive(Clone)]
pub struct TokenCodec {
    keys: JwtKeys,
    access_token_expiry: i64,
}

impl TokenCodec {
    /// Create a codec with the server secret and access-token lifetime in seconds
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            access_token_expiry,
        }
    }

    /// Configured access-token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Issue an access token for the request described by `meta`
    pub fn issue(
        &self,
        user_id: UserId,
        flags: AccessFlags,
        meta: &RequestMetadata,
    ) -> Result<String, TokenError> {
        self.issue_at(user_id, flags, meta, Utc::now().timestamp())
    }

    /// Issue an access token as of the Unix timestamp `now`
    pub fn issue_at(
        &self,
        user_id: UserId,
        flags: AccessFlags,
        meta: &RequestMetadata,
        now: i64,
    ) -> Result<String, TokenError> {
        let sub = user_id.to_string();
        let claims = AccessTokenClaims {
            fgp: fingerprint(&sub, meta),
            sub,
            iat: now,
            exp: now + self.access_token_expiry,
            flags,
        };

        self.keys.sign(&claims)
    }

    /// Verify an access token against the current request
    pub fn verify(&self, token: &str, meta: &RequestMetadata) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, meta, Utc::now().timestamp())
    }

    /// Verify an access token as of the Unix timestamp `now`.
    ///
    /// Checks signature, expiry, then the fingerprint recomputed from the
    /// verifying request's metadata.
    pub fn verify_at(
        &self,
        token: &str,
        meta: &RequestMetadata,
        now: i64,
    ) -> Result<VerifiedToken, TokenError> {
        let raw = self.keys.open(token, now)?;
        let claims: AccessTokenClaims = JwtKeys::parse(raw)?;

        if fingerprint(&claims.sub, meta) != claims.fgp {
            tracing::warn!(subject = %claims.sub, "Access token fingerprint mismatch");
            return Err(TokenError::FingerprintMismatch);
        }

        let user_id = claims.sub.parse().map_err(|_| TokenError::Malformed)?;

        Ok(VerifiedToken {
            user_id,
            flags: claims.flags,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

/// Codec for short-lived tokens used between internal services
#[derive(Clone)]
pub struct InternalTokenCodec {
    keys: JwtKeys,
    expiry: i64,
}

impl InternalTokenCodec {
    #[must_use]
    pub fn new(secret: &str, expiry: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            expiry,
        }
    }

    /// Issue a token for the named calling service
    pub fn issue(&self, service: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = InternalTokenClaims {
            sub: service.to_string(),
            iat: now,
            exp: now + self.expiry,
            token_type: TokenType::Access,
        };

        self.keys.sign(&claims)
    }

    /// Verify signature, expiry and the `type` discriminator
    pub fn verify(&self, token: &str) -> Result<InternalTokenClaims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> Result<InternalTokenClaims, TokenError> {
        let raw = self.keys.open(token, now)?;
        let claims: InternalTokenClaims = JwtKeys::parse(raw)?;

        if claims.token_type != TokenType::Access {
            return Err(TokenError::WrongTokenType);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for InternalTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalTokenCodec")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}
