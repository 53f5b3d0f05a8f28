//! Double-submit CSRF check
//!
//! State-changing cookie-authenticated requests must echo the `csrf_token`
//! cookie in the `x-csrf-token` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use matchday_common::AppError;
use tracing::warn;

use crate::cookies::{self, CSRF_TOKEN_COOKIE};
use crate::response::ApiError;

pub const CSRF_HEADER: &str = "x-csrf-token";

/// Proof that the request passed the double-submit check
#[derive(Debug, Clone, Copy)]
pub struct CsrfGuard;

impl CsrfGuard {
    fn check(header: Option<&str>, cookie: Option<&str>) -> bool {
        matches!((header, cookie), (Some(h), Some(c)) if !h.is_empty() && h == c)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CsrfGuard
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let header = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok());

        if Self::check(header, cookies::value(&jar, CSRF_TOKEN_COOKIE)) {
            Ok(Self)
        } else {
            warn!("CSRF check failed");
            Err(AppError::CsrfMismatch.into())
        }
    }
}
