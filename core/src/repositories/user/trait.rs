//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Emails are stored normalized; callers pass already-normalized values.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Conflict)` - The email is already registered
    /// * `Err(DomainError)` - Any other failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// All users, oldest first
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;
}
