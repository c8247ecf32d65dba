use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use aegis_core::domain::entities::token::RefreshTokenRecord;
use aegis_core::errors::DomainError;
use aegis_core::repositories::TokenRepository;

/// Refresh token records keyed by id
#[derive(Default)]
pub struct InMemoryTokenRepository {
    records: RwLock<HashMap<Uuid, RefreshTokenRecord>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) || records.values().any(|r| r.token == record.token) {
            return Err(DomainError::internal("duplicate refresh token record"));
        }
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.token == token).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn delete_refresh_token(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        let now = Utc::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| !r.is_expired_at(now));
        Ok(before - records.len())
    }
}
