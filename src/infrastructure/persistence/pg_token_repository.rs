//! PostgreSQL implementation of [`TokenRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::ApiToken;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

const TOKEN_COLUMNS: &str = "id, name, token_hash, created_at, last_used_at, revoked_at";

#[derive(FromRow)]
struct TokenRow {
    id: i64,
    name: String,
    token_hash: String,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
}

impl From<TokenRow> for ApiToken {
    fn from(r: TokenRow) -> Self {
        ApiToken {
            id: r.id,
            name: r.name,
            token_hash: r.token_hash,
            created_at: r.created_at,
            last_used_at: r.last_used_at,
            revoked_at: r.revoked_at,
        }
    }
}

pub struct PgTokenRepository {
    pool: Arc<PgPool>,
}

impl PgTokenRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn touch_active(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError> {
        let sql = format!(
            r#"
            UPDATE api_tokens
            SET last_used_at = NOW()
            WHERE token_hash = $1
              AND revoked_at IS NULL
            RETURNING {TOKEN_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, TokenRow>(&sql)
            .bind(token_hash)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, name: &str, token_hash: &str) -> Result<ApiToken, AppError> {
        let sql = format!(
            "INSERT INTO api_tokens (name, token_hash) VALUES ($1, $2) RETURNING {TOKEN_COLUMNS}"
        );

        let row = sqlx::query_as::<_, TokenRow>(&sql)
            .bind(name)
            .bind(token_hash)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<ApiToken>, AppError> {
        let sql = format!("SELECT {TOKEN_COLUMNS} FROM api_tokens ORDER BY created_at DESC, id DESC");

        let rows = sqlx::query_as::<_, TokenRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        let sql = format!("SELECT {TOKEN_COLUMNS} FROM api_tokens WHERE id = $1");

        let row = sqlx::query_as::<_, TokenRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let sql = format!("SELECT {TOKEN_COLUMNS} FROM api_tokens WHERE name = $1");

        let row = sqlx::query_as::<_, TokenRow>(&sql)
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn revoke(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE api_tokens SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
