//! PostgreSQL implementation of RefreshTokenRepository
//!
//! `user_id` is the primary key of `refresh_tokens`, so every user owns at
//! most one row and issuing a token is a single upsert.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use matchday_core::entities::RefreshTokenRecord;
use matchday_core::traits::{RefreshTokenRepository, RepoResult};
use matchday_core::value_objects::UserId;

use crate::models::RefreshTokenModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    #[instrument(skip(self, record), fields(user_id = %record.user_id))]
    async fn upsert_for_user(&self, record: &RefreshTokenRecord) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO refresh_tokens (user_id, token, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET token = EXCLUDED.token,
                expires_at = EXCLUDED.expires_at,
                created_at = EXCLUDED.created_at
            ",
        )
        .bind(record.user_id.into_inner())
        .bind(&record.token)
        .bind(record.expires_at)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshTokenRecord>> {
        let result = sqlx::query_as::<_, RefreshTokenModel>(
            r"
            SELECT user_id, token, expires_at, created_at
            FROM refresh_tokens
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshTokenRecord::from))
    }

    #[instrument(skip(self))]
    async fn delete_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
