//! Session cookies
//!
//! | cookie          | HttpOnly | SameSite | Max-Age          |
//! |-----------------|----------|----------|------------------|
//! | `access_token`  | yes      | Strict   | access lifetime  |
//! | `refresh_token` | yes      | Strict   | refresh lifetime |
//! | `csrf_token`    | no       | Lax      | 365 days         |
//!
//! All cookies live on `/`. Clearing re-sends the name with an empty value
//! and `Max-Age=0`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use matchday_common::JwtConfig;
use time::Duration;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
pub const CSRF_TOKEN_COOKIE: &str = "csrf_token";

const CSRF_TOKEN_TTL_DAYS: i64 = 365;

/// Cookie settings derived from configuration
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    secure: bool,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl CookiePolicy {
    pub fn new(jwt: &JwtConfig, secure: bool) -> Self {
        Self {
            secure,
            access_ttl: Duration::seconds(jwt.access_token_expiry),
            refresh_ttl: Duration::seconds(jwt.refresh_token_expiry),
        }
    }

    pub fn access_token(&self, token: String) -> Cookie<'static> {
        self.build(ACCESS_TOKEN_COOKIE, token, true, SameSite::Strict, self.access_ttl)
    }

    pub fn refresh_token(&self, token: String) -> Cookie<'static> {
        self.build(REFRESH_TOKEN_COOKIE, token, true, SameSite::Strict, self.refresh_ttl)
    }

    /// Readable by client scripts so they can echo it in `x-csrf-token`
    pub fn csrf_token(&self, token: String) -> Cookie<'static> {
        self.build(
            CSRF_TOKEN_COOKIE,
            token,
            false,
            SameSite::Lax,
            Duration::days(CSRF_TOKEN_TTL_DAYS),
        )
    }

    /// Add all three session cookies
    pub fn set_session(
        &self,
        jar: CookieJar,
        access_token: String,
        refresh_token: String,
        csrf_token: String,
    ) -> CookieJar {
        jar.add(self.access_token(access_token))
            .add(self.refresh_token(refresh_token))
            .add(self.csrf_token(csrf_token))
    }

    fn build(
        &self,
        name: &'static str,
        value: String,
        http_only: bool,
        same_site: SameSite,
        max_age: Duration,
    ) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(http_only)
            .secure(self.secure)
            .same_site(same_site)
            .path("/")
            .max_age(max_age)
            .build()
    }
}

/// Removal cookie for `name`
pub fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Expire the refresh cookie only
pub fn clear_refresh(jar: CookieJar) -> CookieJar {
    jar.add(removal(REFRESH_TOKEN_COOKIE))
}

/// Expire every session cookie
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.add(removal(ACCESS_TOKEN_COOKIE))
        .add(removal(REFRESH_TOKEN_COOKIE))
        .add(removal(CSRF_TOKEN_COOKIE))
}

/// Value of cookie `name`, if present and non-empty
pub fn value<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(Cookie::value).filter(|v| !v.is_empty())
}
