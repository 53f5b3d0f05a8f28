//! Authorization gate
//!
//! Extracts the bearer token from the `Authorization` header and verifies it
//! against the current request. The gate never touches the store: the flags
//! it exposes are the ones snapshotted into the token at issuance.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use matchday_common::{AppError, InternalTokenClaims};
use matchday_core::value_objects::{AccessFlags, UserId};
use tracing::debug;

use crate::response::ApiError;
use crate::state::AppState;

use super::client::ClientMeta;

/// Authenticated user extracted from the access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub flags: AccessFlags,
    pub expires_at: i64,
    /// The raw bearer token
    pub token: String,
}

async fn bearer_token<S>(parts: &mut Parts, state: &S) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::from(AppError::MissingAuth))?;
    Ok(bearer.token().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await?;
        let ClientMeta(meta) = ClientMeta::from_headers(&parts.headers);

        let app_state = AppState::from_ref(state);
        let verified = app_state.token_codec().verify(&token, &meta).map_err(|e| {
            debug!(error = %e, "Access token rejected at the gate");
            ApiError::from(AppError::from(e))
        })?;

        Ok(Self {
            user_id: verified.user_id,
            flags: verified.flags,
            expires_at: verified.expires_at,
            token,
        })
    }
}

/// Authenticated user whose token carries the admin flag
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.flags.is_admin {
            return Err(AppError::InsufficientPermissions.into());
        }
        Ok(Self(user))
    }
}

/// Another backend service holding an internal access token
#[derive(Debug, Clone)]
pub struct InternalCaller(pub InternalTokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for InternalCaller
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await?;

        let app_state = AppState::from_ref(state);
        let claims = app_state
            .service_context()
            .internal_token_codec()
            .verify(&token)
            .map_err(|e| {
                debug!(error = %e, "Internal token rejected");
                ApiError::from(AppError::from(e))
            })?;

        Ok(Self(claims))
    }
}
