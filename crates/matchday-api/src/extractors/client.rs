//! Request metadata extractor
//!
//! Reads the user-agent and client address headers that feed fingerprints
//! and rate limiting.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use matchday_common::RequestMetadata;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Client description of the current request
#[derive(Debug, Clone, Default)]
pub struct ClientMeta(pub RequestMetadata);

impl ClientMeta {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self(RequestMetadata::new(
            read(header::USER_AGENT.as_str()),
            read(X_FORWARDED_FOR),
            read(X_REAL_IP),
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
