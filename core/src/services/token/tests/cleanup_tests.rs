//! Unit tests for the expired token sweeper

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::repositories::MockTokenRepository;
use crate::services::token::{TokenCleanupConfig, TokenCleanupService};

fn record(expires_in: Duration) -> RefreshTokenRecord {
    let mut record = RefreshTokenRecord::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4().to_string(),
        Utc::now(),
    );
    record.expires_at = Utc::now() + expires_in;
    record
}

#[tokio::test]
async fn test_cleanup_removes_only_expired_records() {
    let repo = Arc::new(MockTokenRepository::new());
    let live = record(Duration::days(3));
    let live_id = live.id;
    repo.insert(live).await;
    repo.insert(record(-Duration::hours(1))).await;
    repo.insert(record(-Duration::days(30))).await;

    let service = TokenCleanupService::new(repo.clone(), TokenCleanupConfig::default());
    let result = service.run_cleanup().await.unwrap();

    assert_eq!(result.expired_tokens_deleted, 2);
    assert_eq!(repo.len().await, 1);
    assert!(repo.contains(live_id).await);
}

#[tokio::test]
async fn test_disabled_cleanup_is_a_no_op() {
    let repo = Arc::new(MockTokenRepository::new());
    repo.insert(record(-Duration::hours(1))).await;

    let config = TokenCleanupConfig {
        enabled: false,
        ..TokenCleanupConfig::default()
    };
    let service = Arc::new(TokenCleanupService::new(repo.clone(), config));

    assert_eq!(service.run_cleanup().await.unwrap().expired_tokens_deleted, 0);
    assert_eq!(repo.len().await, 1);
    assert!(service.start_background_task().is_none());
}

#[tokio::test]
async fn test_cleanup_surfaces_store_errors() {
    let repo = Arc::new(MockTokenRepository::new());
    repo.set_failing(true);

    let service = TokenCleanupService::new(repo, TokenCleanupConfig::default());
    assert!(service.run_cleanup().await.unwrap_err().is_internal());
}

#[tokio::test(start_paused = true)]
async fn test_background_task_sweeps_on_interval() {
    let repo = Arc::new(MockTokenRepository::new());
    let config = TokenCleanupConfig {
        interval_seconds: 60,
        ..TokenCleanupConfig::default()
    };
    let service = Arc::new(TokenCleanupService::new(repo.clone(), config));
    let handle = service.start_background_task().unwrap();

    // First tick fires immediately
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    repo.insert(record(-Duration::minutes(1))).await;
    assert_eq!(repo.len().await, 1);

    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    assert_eq!(repo.len().await, 0);

    handle.abort();
}
