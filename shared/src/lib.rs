//! Shared utilities and common types for the Aegis server
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types loaded from the environment
//! - The API error response envelope and error codes
//! - Input validation for credentials

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig,
    LoggingConfig, ServerConfig, TokenCleanupSettings,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
