//! PostgreSQL share repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use droplink_core::error::{AppError, ErrorKind};
use droplink_core::result::AppResult;
use droplink_core::types::code::ShareCode;
use droplink_entity::share::{CreateShare, Share};

use crate::provider::ShareRepository;

/// Repository for share CRUD and code lookup backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PostgresShareRepository {
    pool: PgPool,
}

impl PostgresShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareRepository for PostgresShareRepository {
    fn provider_type(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    async fn insert(&self, data: &CreateShare) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO shares (code, text, file_name, file_size, file_type, blob_key, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.code)
        .bind(&data.text)
        .bind(&data.file_name)
        .bind(data.file_size)
        .bind(&data.file_type)
        .bind(&data.blob_key)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!("Code {} is already taken", data.code));
                }
            }
            AppError::with_source(ErrorKind::Database, "Failed to insert share", e)
        })
    }

    async fn find_by_code(&self, code: &ShareCode) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share by code", e)
            })
    }

    async fn increment_download_count(&self, code: &ShareCode) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE shares SET download_count = download_count + 1 \
             WHERE code = $1 RETURNING download_count",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to increment download count", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("No share for code {code}")))
    }

    async fn find_expired(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE status = 'active' AND expires_at <= $1 \
             ORDER BY expires_at ASC LIMIT $2",
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list expired shares", e))
    }

    async fn mark_expired(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE shares SET status = 'expired' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mark share expired", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("No share with id {id}")));
        }
        Ok(())
    }

    async fn purge_expired_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM shares WHERE status = 'expired' AND expires_at < $1")
                .bind(cutoff)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to purge shares", e)
                })?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shares")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count shares", e))?;
        Ok(total as u64)
    }
}
