//! In-process stores
//!
//! Same contracts as the PostgreSQL and Redis implementations, held in
//! memory. Used by the HTTP tests and for running without external services.

mod revocation_cache;
mod token_repository;
mod user_repository;

pub use revocation_cache::InMemoryRevocationCache;
pub use token_repository::InMemoryTokenRepository;
pub use user_repository::InMemoryUserRepository;
