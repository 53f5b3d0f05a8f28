//! Integration test utilities for the matchday API
//!
//! Spawns the real router over TCP with in-memory stores so the session
//! flows run without PostgreSQL or Redis.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
