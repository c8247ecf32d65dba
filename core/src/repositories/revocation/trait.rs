//! Revocation cache trait: a TTL key-value store holding blacklisted access tokens.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::DomainError;

/// Key prefix for blacklisted access tokens
pub const BLACKLIST_KEY_PREFIX: &str = "blacklist:access_token:";

/// Cache key under which `token` is blacklisted
pub fn blacklist_key(token: &str) -> String {
    format!("{}{}", BLACKLIST_KEY_PREFIX, token)
}

/// Key-value store with per-key expiry
///
/// Only presence matters; the stored value is opaque.
#[async_trait]
pub trait RevocationCache: Send + Sync {
    /// Set `key` so that it disappears after `ttl`
    async fn set_with_ttl(&self, key: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Whether `key` is currently present
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;
}
