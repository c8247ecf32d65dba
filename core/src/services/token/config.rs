//! Configuration for the token services

use std::time::Duration;

use aegis_shared::config::AuthConfig;

use crate::services::store::DEFAULT_STORE_TIMEOUT;

/// Configuration for the token services
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// HS256 secret for access tokens
    pub access_secret: String,
    /// HS256 secret for refresh tokens
    pub refresh_secret: String,
    /// Upper bound for each store call
    pub store_timeout: Duration,
}

impl TokenServiceConfig {
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("access_secret", &"****")
            .field("refresh_secret", &"****")
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            access_secret: config.jwt.access_secret.clone(),
            refresh_secret: config.jwt.refresh_secret.clone(),
            store_timeout: config.store_timeout(),
        }
    }
}
