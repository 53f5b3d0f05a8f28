//! Route definitions
//!
//! Public endpoints are mounted under /api/v1, service-to-service endpoints
//! under /internal.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{admin, auth, health, internal, users};
use crate::state::AppState;

/// Create the main router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .nest("/internal", internal_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/session", get(auth::session))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/@me", get(users::get_current_user))
}

/// Admin routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users/:user_id", delete(admin::delete_user))
        .route("/admin/users/:user_id/sessions", delete(admin::revoke_sessions))
}

/// Internal service routes
fn internal_routes() -> Router<AppState> {
    Router::new().route(
        "/users/:user_id/revoke-sessions",
        post(internal::revoke_sessions),
    )
}
