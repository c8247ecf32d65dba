//! Background sweeper for expired refresh token records
//!
//! Expired records are already rejected by rotation and logout; this only
//! keeps the table from growing without bound.

use std::sync::Arc;
use std::time::Duration;

use aegis_shared::config::TokenCleanupSettings;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;
use crate::services::store::with_timeout;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
    /// Upper bound for one sweep's store call
    pub store_timeout: Duration,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
            store_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&TokenCleanupSettings> for TokenCleanupConfig {
    fn from(settings: &TokenCleanupSettings) -> Self {
        Self {
            interval_seconds: settings.interval_seconds,
            enabled: settings.enabled,
            ..Self::default()
        }
    }
}

/// Service for cleaning up expired refresh token records
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    repository: Arc<R>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository> TokenCleanupService<R> {
    /// Create a new token cleanup service
    pub fn new(repository: Arc<R>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of the sweep
    /// * `Err(DomainError)` - If the store call fails or times out
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let expired_tokens_deleted = with_timeout(
            self.config.store_timeout,
            "delete_expired_tokens",
            self.repository.delete_expired_tokens(),
        )
        .await?;

        info!(deleted = expired_tokens_deleted, "Token cleanup completed");
        Ok(CleanupResult {
            expired_tokens_deleted,
        })
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled. The first sweep runs
    /// immediately, then once per interval.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let interval = Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Token cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!(error = ?e.detail(), "Token cleanup cycle failed");
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired refresh tokens deleted
    pub expired_tokens_deleted: usize,
}
