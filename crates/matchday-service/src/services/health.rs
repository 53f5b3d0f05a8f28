//! Liveness and readiness checks

use async_trait::async_trait;
use matchday_db::PgPool;
use tracing::warn;

use crate::dto::ReadinessResponse;

use super::context::ServiceContext;

/// Reachability probe for the relational store
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> Result<(), String>;
}

#[async_trait]
impl DatabaseProbe for PgPool {
    async fn ping(&self) -> Result<(), String> {
        matchday_db::ping(self).await.map_err(|e| e.to_string())
    }
}

pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Probe the database and the cache
    pub async fn readiness(&self) -> ReadinessResponse {
        let database = match self.ctx.database_probe().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Database readiness probe failed");
                false
            }
        };

        let cache = match self.ctx.cache().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Cache readiness probe failed");
                false
            }
        };

        ReadinessResponse::ready(database, cache)
    }
}
