use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use aegis_core::errors::DomainError;
use aegis_core::repositories::RevocationCache;

/// TTL map; entries are dropped lazily once expired
#[derive(Default)]
pub struct InMemoryRevocationCache {
    entries: RwLock<HashMap<String, Instant>>,
}

impl InMemoryRevocationCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationCache for InMemoryRevocationCache {
    async fn set_with_ttl(&self, key: &str, ttl: Duration) -> Result<(), DomainError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, deadline| *deadline > now);
        entries.insert(key.to_string(), now + ttl);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .map(|deadline| *deadline > Instant::now())
            .unwrap_or(false))
    }
}
