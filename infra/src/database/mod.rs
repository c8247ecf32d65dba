//! Database module - PostgreSQL implementations using SQLx
//!
//! - Connection pool management and health checks
//! - Embedded schema migrations
//! - Repository implementations for refresh tokens and users

pub mod connection;
pub mod postgres;

pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::{PgTokenRepository, PgUserRepository};
