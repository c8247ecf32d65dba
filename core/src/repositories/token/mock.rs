//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing
///
/// Records are keyed by id. Failures and latency can be injected to exercise
/// error and timeout paths.
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, RefreshTokenRecord>>>,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
    delete_calls: AtomicUsize,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            failing: AtomicBool::new(false),
            delay: Mutex::new(None),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent call fail with an internal error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay every subsequent call
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Insert a record directly, bypassing failure injection
    pub async fn insert(&self, record: RefreshTokenRecord) {
        self.tokens.write().await.insert(record.id, record);
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.tokens.read().await.contains_key(&id)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    async fn before_call(&self) -> Result<(), DomainError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock token store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        self.before_call().await?;
        let mut tokens = self.tokens.write().await;

        if tokens.values().any(|t| t.token == record.token) {
            return Err(DomainError::internal("duplicate refresh token"));
        }

        tokens.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        self.before_call().await?;
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token == token).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        self.before_call().await?;
        Ok(self.tokens.read().await.get(&id).cloned())
    }

    async fn delete_refresh_token(&self, id: Uuid) -> Result<bool, DomainError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.before_call().await?;
        Ok(self.tokens.write().await.remove(&id).is_some())
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        self.before_call().await?;
        let mut tokens = self.tokens.write().await;
        let now = Utc::now();
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired_at(now));
        Ok(before - tokens.len())
    }
}
