//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing secrets, store timeouts and cleanup scheduling
//! - `cache` - Redis configuration for the revocation cache
//! - `database` - PostgreSQL connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, TokenCleanupSettings};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Check the configuration is safe to start with.
    ///
    /// Production refuses to run without usable signing secrets. Other
    /// environments start anyway and every token operation fails closed.
    pub fn validate(&self) -> Result<(), String> {
        if let Err(reason) = self.auth.jwt.validate() {
            if self.environment.is_production() {
                return Err(reason);
            }
        }
        if self.server.port == 0 {
            return Err("SERVER_PORT must be non-zero".to_string());
        }
        Ok(())
    }
}
