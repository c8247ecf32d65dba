//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    failing: AtomicBool,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with an internal error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Insert a user directly
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Remove a user directly
    pub async fn remove(&self, id: Uuid) {
        self.users.write().await.remove(&id);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock user store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.check()?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check()?;
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.check()?;
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }
}
