//! # Infrastructure Layer
//!
//! Concrete storage behind the core's repository and cache traits.
//!
//! ## Architecture
//!
//! - **Database**: PostgreSQL refresh token and user repositories using SQLx
//! - **Cache**: Redis client and the access token revocation cache
//! - **Memory**: in-process implementations for development and tests
//!
//! ## Features
//!
//! - `postgres`: Enable PostgreSQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

/// Database module - PostgreSQL implementations using SQLx
#[cfg(feature = "postgres")]
pub mod database;

/// Cache module - Redis client and revocation cache
#[cfg(feature = "redis-cache")]
pub mod cache;

/// In-memory stores
pub mod memory;

/// Infrastructure-specific error types
///
/// Used while wiring up connections. Once running, repositories report
/// through the core's `DomainError`.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
