//! Axum extractors for request handling
//!
//! Custom extractors for the authorization gate, client metadata, CSRF and
//! JSON bodies.

mod auth;
mod client;
mod csrf;
mod json;
mod path;

pub use auth::{AdminUser, AuthUser, InternalCaller};
pub use client::ClientMeta;
pub use csrf::{CsrfGuard, CSRF_HEADER};
pub use json::JsonBody;
pub use path::UserIdPath;
