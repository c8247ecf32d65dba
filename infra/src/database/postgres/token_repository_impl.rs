//! PostgreSQL implementation of the TokenRepository trait.
//!
//! Refresh token records live in `refresh_tokens`. The encoded token is
//! stored as issued; lookups match it exactly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use aegis_core::domain::entities::token::RefreshTokenRecord;
use aegis_core::errors::DomainError;
use aegis_core::repositories::TokenRepository;

/// PostgreSQL implementation of TokenRepository
pub struct PgTokenRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgTokenRepository {
    /// Create a new PostgreSQL token repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database row to a RefreshTokenRecord
    fn row_to_record(row: &PgRow) -> Result<RefreshTokenRecord, DomainError> {
        Ok(RefreshTokenRecord {
            id: row
                .try_get::<Uuid, _>("id")
                .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?,
            user_id: row
                .try_get::<Uuid, _>("user_id")
                .map_err(|e| DomainError::internal(format!("Failed to get user_id: {}", e)))?,
            token: row
                .try_get("token")
                .map_err(|e| DomainError::internal(format!("Failed to get token: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::internal(format!("Failed to get expires_at: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (id, user_id, token, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(record.id)
            .bind(record.user_id)
            .bind(&record.token)
            .bind(record.expires_at)
            .bind(record.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to save refresh token: {}", e)))?;

        Ok(record)
    }

    async fn find_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, token, expires_at, created_at
            FROM refresh_tokens
            WHERE token = $1
        "#;

        let row = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find refresh token: {}", e)))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, token, expires_at, created_at
            FROM refresh_tokens
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find token by id: {}", e)))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn delete_refresh_token(&self, id: Uuid) -> Result<bool, DomainError> {
        // A single DELETE is atomic; concurrent callers see one row affected
        // between them.
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete refresh token: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete expired tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}
