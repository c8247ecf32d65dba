//! Access token blacklist on top of a [`RevocationCache`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::value_objects::AccessRevocation;
use crate::errors::DomainResult;
use crate::repositories::{blacklist_key, RevocationCache};
use crate::services::store::with_timeout;

/// Blacklists access tokens for the remainder of their lifetime
pub struct TokenBlacklist<C: RevocationCache> {
    cache: Arc<C>,
    store_timeout: Duration,
}

impl<C: RevocationCache> TokenBlacklist<C> {
    pub fn new(cache: Arc<C>, store_timeout: Duration) -> Self {
        Self {
            cache,
            store_timeout,
        }
    }

    /// Blacklist `token` until `expires_at`
    ///
    /// Never fails: the outcome says whether the entry was written.
    pub async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> AccessRevocation {
        let remaining = expires_at - Utc::now();
        let ttl = match remaining.to_std() {
            Ok(ttl) if !ttl.is_zero() => ttl,
            _ => return AccessRevocation::NotRequired,
        };

        let key = blacklist_key(token);
        match with_timeout(
            self.store_timeout,
            "blacklist_set",
            self.cache.set_with_ttl(&key, ttl),
        )
        .await
        {
            Ok(()) => {
                debug!(ttl_ms = ttl.as_millis() as u64, "Access token blacklisted");
                AccessRevocation::Blacklisted
            }
            Err(e) => {
                let detail = e.detail().unwrap_or("cache write failed").to_string();
                warn!(error = %detail, "Failed to blacklist access token");
                AccessRevocation::Failed { detail }
            }
        }
    }

    /// Whether `token` is blacklisted; cache failures are returned to the caller
    pub async fn is_revoked(&self, token: &str) -> DomainResult<bool> {
        let key = blacklist_key(token);
        with_timeout(self.store_timeout, "blacklist_exists", self.cache.exists(&key)).await
    }
}
