//! Authentication handlers
//!
//! Endpoints for registration, login, the session probe, token refresh and
//! logout. Session credentials travel in cookies; see [`crate::cookies`].

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use chrono::{TimeZone, Utc};
use matchday_common::{messages::codes, AppError};
use matchday_service::{
    dto::{LoginRequest, RegisterRequest, SessionResponse, UserResponse},
    AccountService, AuthenticatedSession, SessionService, SessionState,
};

use crate::cookies::{self, CookiePolicy, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::extractors::{ClientMeta, CsrfGuard, JsonBody};
use crate::response::{ApiError, ApiResult, ApiSuccess, Created};
use crate::state::AppState;

fn cookie_policy(state: &AppState) -> CookiePolicy {
    CookiePolicy::new(&state.config().jwt, state.secure_cookies())
}

fn session_response(session: &AuthenticatedSession) -> SessionResponse {
    SessionResponse {
        user_id: session.user_id,
        is_admin: session.flags.is_admin,
        has_access: session.flags.has_access,
        expires_at: Utc.timestamp_opt(session.expires_at, 0).single(),
        refreshed: session.new_access_token.is_some(),
    }
}

/// Set the access cookie when the session carries a new access token
fn with_new_access_token(
    policy: &CookiePolicy,
    jar: CookieJar,
    session: &AuthenticatedSession,
) -> CookieJar {
    match &session.new_access_token {
        Some(token) => jar.add(policy.access_token(token.clone())),
        None => jar,
    }
}

/// Register a new account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<Created<ApiSuccess<UserResponse>>> {
    let user = AccountService::new(state.service_context())
        .register(&request, &meta)
        .await?;
    Ok(Created(ApiSuccess::new(
        codes::REGISTERED,
        UserResponse::from(&user),
    )))
}

/// Login with e-mail and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    jar: CookieJar,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<(CookieJar, ApiSuccess<UserResponse>)> {
    let outcome = SessionService::new(state.service_context())
        .login(&request, &meta)
        .await?;

    let tokens = outcome.tokens;
    let jar = cookie_policy(&state).set_session(
        jar,
        tokens.access_token,
        tokens.refresh_token,
        tokens.csrf_token,
    );

    Ok((
        jar,
        ApiSuccess::new(codes::LOGIN_SUCCESS, UserResponse::from(&outcome.user)),
    ))
}

/// Report the caller's session, re-establishing it from the refresh cookie
/// when the access cookie is missing or no longer verifies
///
/// GET /auth/session
pub async fn session(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    jar: CookieJar,
) -> ApiResult<Response> {
    let session_state = SessionService::new(state.service_context())
        .verify_or_refresh(
            cookies::value(&jar, ACCESS_TOKEN_COOKIE),
            cookies::value(&jar, REFRESH_TOKEN_COOKIE),
            &meta,
        )
        .await?;

    match session_state {
        SessionState::Authenticated(session) => {
            let jar = with_new_access_token(&cookie_policy(&state), jar, &session);
            let body = ApiSuccess::new(codes::SESSION_ACTIVE, session_response(&session));
            Ok((jar, body).into_response())
        }
        SessionState::Unauthenticated => Ok((
            cookies::clear_refresh(jar),
            ApiError::from(AppError::MissingAuth),
        )
            .into_response()),
    }
}

/// Issue a new access token from the refresh cookie
///
/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    jar: CookieJar,
) -> ApiResult<Response> {
    let result = SessionService::new(state.service_context())
        .refresh(cookies::value(&jar, REFRESH_TOKEN_COOKIE), &meta)
        .await;

    match result {
        Ok(session) => {
            let jar = with_new_access_token(&cookie_policy(&state), jar, &session);
            let body = ApiSuccess::new(codes::TOKEN_REFRESHED, session_response(&session));
            Ok((jar, body).into_response())
        }
        Err(e) if e.is_app(AppError::is_unauthorized) => {
            Ok((cookies::clear_refresh(jar), ApiError::from(e)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// End the session; all session cookies are cleared regardless of outcome
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    _csrf: CsrfGuard,
    jar: CookieJar,
) -> Response {
    let result = SessionService::new(state.service_context())
        .logout(
            cookies::value(&jar, ACCESS_TOKEN_COOKIE),
            cookies::value(&jar, REFRESH_TOKEN_COOKIE),
            &meta,
        )
        .await;

    let jar = cookies::clear_session(jar);
    match result {
        Ok(outcome) if outcome.session_existed() => {
            (jar, ApiSuccess::message(codes::LOGOUT_SUCCESS)).into_response()
        }
        Ok(_) => (jar, ApiSuccess::message(codes::SESSION_ALREADY_ENDED)).into_response(),
        Err(e) => (jar, ApiError::from(e)).into_response(),
    }
}
