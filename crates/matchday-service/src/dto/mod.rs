//! Data transfer objects for API requests and responses

pub mod requests;
pub mod responses;

pub use requests::{normalize_email, LoginRequest, RegisterRequest};
pub use responses::{
    CurrentUserResponse, HealthChecks, HealthResponse, ReadinessResponse,
    RevokedSessionsResponse, SessionResponse, UserResponse,
};
