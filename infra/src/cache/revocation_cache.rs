//! Redis-backed access token blacklist.

use std::time::Duration;

use async_trait::async_trait;

use aegis_core::errors::DomainError;
use aegis_core::repositories::RevocationCache;

use super::redis_client::RedisClient;

/// Stored value; only the key's presence is meaningful
const REVOKED_MARKER: &str = "1";

/// [`RevocationCache`] over Redis `PSETEX` / `EXISTS`
#[derive(Clone)]
pub struct RedisRevocationCache {
    client: RedisClient,
}

impl RedisRevocationCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl RevocationCache for RedisRevocationCache {
    async fn set_with_ttl(&self, key: &str, ttl: Duration) -> Result<(), DomainError> {
        self.client
            .set_with_expiry(key, REVOKED_MARKER, ttl)
            .await
            .map_err(|e| DomainError::internal(format!("revocation cache write failed: {}", e)))
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.client
            .exists(key)
            .await
            .map_err(|e| DomainError::internal(format!("revocation cache read failed: {}", e)))
    }
}
