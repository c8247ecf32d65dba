//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Repository trait for refresh token record persistence
///
/// A record is the server-side half of a refresh token: the token is only
/// honoured while its record exists. Implementations must make
/// [`delete_refresh_token`](TokenRepository::delete_refresh_token) atomic so
/// that of several concurrent deletes of the same id exactly one observes
/// `true`.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token record
    ///
    /// # Arguments
    /// * `record` - The record to persist
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token)
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use uuid::Uuid;
    /// # use aegis_core::repositories::TokenRepository;
    /// # use aegis_core::domain::entities::token::RefreshTokenRecord;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), "encoded".into(), Utc::now());
    ///
    /// let saved = repo.save_refresh_token(record).await?;
    /// println!("Token saved with ID: {}", saved.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a record by the exact encoded token
    ///
    /// # Returns
    /// * `Ok(Some(RefreshTokenRecord))` - Record found
    /// * `Ok(None)` - No record for this token
    /// * `Err(DomainError)` - Database error occurred
    async fn find_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Find a record by its id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Delete a record by id
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed the record
    /// * `Ok(false)` - No record with this id existed (already used or revoked)
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_refresh_token(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete expired records
    ///
    /// This method should be called periodically to clean up expired tokens.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    /// * `Err(DomainError)` - Deletion failed
    ///
    /// # Example
    /// ```no_run
    /// # use aegis_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let deleted = repo.delete_expired_tokens().await?;
    /// println!("Cleaned up {} expired tokens", deleted);
    /// # Ok(())
    /// # }
    /// ```
    async fn delete_expired_tokens(&self) -> Result<usize, DomainError>;
}
