//! Mock implementation of RevocationCache for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::RevocationCache;

/// In-memory TTL map with independent read and write failure switches
pub struct MockRevocationCache {
    entries: RwLock<HashMap<String, (Instant, Duration)>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    exists_calls: AtomicUsize,
}

impl MockRevocationCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            exists_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    /// TTL recorded for `key`, if set
    pub async fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.read().await.get(key).map(|(_, ttl)| *ttl)
    }
}

impl Default for MockRevocationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationCache for MockRevocationCache {
    async fn set_with_ttl(&self, key: &str, ttl: Duration) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock cache write failed"));
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), (Instant::now(), ttl));
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock cache read failed"));
        }
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .map(|(set_at, ttl)| set_at.elapsed() < *ttl)
            .unwrap_or(false))
    }
}
