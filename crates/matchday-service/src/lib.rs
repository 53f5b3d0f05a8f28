//! # matchday-service
//!
//! Application layer: the session lifecycle, account management, and the DTOs
//! exchanged with the HTTP surface.

pub mod dto;
pub mod services;

pub use services::{
    AccountService, AuthenticatedSession, DatabaseProbe, HealthService, LogMailer,
    LoginOutcome, LogoutOutcome, RefreshTokenService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, SessionService, SessionState, SessionTokens,
};
