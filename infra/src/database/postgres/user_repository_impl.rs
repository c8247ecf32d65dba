//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use aegis_core::domain::entities::user::{Role, User};
use aegis_core::errors::DomainError;
use aegis_core::repositories::UserRepository;

const USER_COLUMNS: &str = "id, email, password_hash, role, created_at";

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::internal(format!("Failed to get role: {}", e)))?;

        Ok(User {
            id: row
                .try_get::<Uuid, _>("id")
                .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::internal(format!("Failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::internal(format!("Failed to get password_hash: {}", e)))?,
            role: role.parse::<Role>().map_err(DomainError::internal)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find user by email: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find user by id: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Conflict,
                other => DomainError::internal(format!("Failed to create user: {}", other)),
            })?;

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to check email: {}", e)))
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY created_at", USER_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list users: {}", e)))?;

        rows.iter().map(Self::row_to_user).collect()
    }
}
