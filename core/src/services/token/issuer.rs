//! Token issuer: mints a token pair and persists the refresh record.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::entities::token::{RefreshTokenRecord, TokenPair};
use crate::domain::entities::user::Identity;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::TokenRepository;
use crate::services::store::with_timeout;

use super::codec::TokenCodec;

/// Issues token pairs
///
/// The refresh record is persisted before the pair is returned, so a refresh
/// token handed to a client always has a record behind it. A failure at any
/// step surfaces as an internal error and no pair is returned.
pub struct TokenIssuer<R: TokenRepository> {
    codec: Arc<TokenCodec>,
    repository: Arc<R>,
    store_timeout: Duration,
}

impl<R: TokenRepository> TokenIssuer<R> {
    pub fn new(codec: Arc<TokenCodec>, repository: Arc<R>, store_timeout: Duration) -> Self {
        Self {
            codec,
            repository,
            store_timeout,
        }
    }

    /// Issue a new pair for `identity`
    pub async fn issue(&self, identity: &Identity) -> DomainResult<TokenPair> {
        let now = Utc::now();
        let token_id = Uuid::new_v4();

        let (access_token, _) = self
            .codec
            .issue_access_at(identity, now)
            .map_err(into_internal)?;
        let refresh_token = self
            .codec
            .issue_refresh_at(identity.user_id, token_id, now)
            .map_err(into_internal)?;

        let record = RefreshTokenRecord::new(token_id, identity.user_id, refresh_token.clone(), now);
        with_timeout(
            self.store_timeout,
            "save_refresh_token",
            self.repository.save_refresh_token(record),
        )
        .await
        .map_err(|e| {
            error!(user_id = %identity.user_id, error = ?e.detail(), "Failed to persist refresh token");
            into_internal(e)
        })?;

        debug!(user_id = %identity.user_id, token_id = %token_id, "Issued token pair");
        Ok(TokenPair::new(access_token, refresh_token))
    }
}

fn into_internal(err: DomainError) -> DomainError {
    match err {
        DomainError::Internal { .. } => err,
        other => DomainError::internal(other.detail().unwrap_or("token issuance failed").to_string()),
    }
}
