//! Refresh token rotation and logout

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::entities::token::{RefreshClaims, RefreshTokenRecord, TokenPair};
use crate::domain::value_objects::{AccessRevocation, RevocationOutcome};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{RevocationCache, TokenRepository, UserRepository};
use crate::services::store::with_timeout;

use super::blacklist::TokenBlacklist;
use super::codec::TokenCodec;
use super::issuer::TokenIssuer;

/// Service for rotating and revoking refresh tokens
///
/// A refresh token is single use. Deleting its record is the step that
/// claims it, so of any number of concurrent rotations or logouts presenting
/// the same token exactly one proceeds and the rest see an invalid token.
pub struct TokenService<T, U, C>
where
    T: TokenRepository,
    U: UserRepository,
    C: RevocationCache,
{
    codec: Arc<TokenCodec>,
    issuer: Arc<TokenIssuer<T>>,
    tokens: Arc<T>,
    users: Arc<U>,
    blacklist: Arc<TokenBlacklist<C>>,
    store_timeout: Duration,
}

impl<T, U, C> TokenService<T, U, C>
where
    T: TokenRepository,
    U: UserRepository,
    C: RevocationCache,
{
    pub fn new(
        codec: Arc<TokenCodec>,
        issuer: Arc<TokenIssuer<T>>,
        tokens: Arc<T>,
        users: Arc<U>,
        blacklist: Arc<TokenBlacklist<C>>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            codec,
            issuer,
            tokens,
            users,
            blacklist,
            store_timeout,
        }
    }

    /// Exchange a refresh token for a new pair
    ///
    /// The presented token is unusable afterwards whether or not the new pair
    /// is issued successfully.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let (claims, record) = self.validate_refresh_token(refresh_token).await?;

        // The user is resolved before the record is consumed, so a missing
        // account leaves the token in place.
        let user = with_timeout(
            self.store_timeout,
            "find_user_by_id",
            self.users.find_by_id(claims.user_id),
        )
        .await?
        .ok_or_else(|| {
            error!(user_id = %claims.user_id, "Refresh token references a missing user");
            DomainError::internal(format!("user {} not found during refresh", claims.user_id))
        })?;

        self.consume(&record).await?;

        let pair = self.issuer.issue(&user.identity()).await?;
        info!(user_id = %user.id, "Refresh token rotated");
        Ok(pair)
    }

    /// Revoke a refresh token and, if presented, blacklist the access token
    ///
    /// Fails only if the refresh token could not be revoked. A problem with the
    /// access token is reported in the outcome instead.
    pub async fn revoke_tokens(
        &self,
        refresh_token: &str,
        access_token: Option<&str>,
    ) -> DomainResult<RevocationOutcome> {
        let (claims, record) = self.validate_refresh_token(refresh_token).await?;
        self.consume(&record).await?;

        let access = match access_token {
            None => AccessRevocation::NotRequired,
            Some(token) => self.revoke_access_token(token).await,
        };

        let outcome = RevocationOutcome::new(access);
        if outcome.is_complete() {
            info!(user_id = %claims.user_id, "Logged out");
        } else {
            warn!(
                user_id = %claims.user_id,
                "Logged out but the access token stays valid until it expires"
            );
        }
        Ok(outcome)
    }

    /// Verify a refresh token and load its record
    async fn validate_refresh_token(
        &self,
        refresh_token: &str,
    ) -> DomainResult<(RefreshClaims, RefreshTokenRecord)> {
        let claims = self.codec.verify_refresh(refresh_token)?;

        let record = with_timeout(
            self.store_timeout,
            "find_refresh_token",
            self.tokens.find_refresh_token(refresh_token),
        )
        .await?
        .ok_or_else(|| DomainError::invalid_token("refresh token has no record"))?;

        if record.is_expired() {
            return Err(DomainError::invalid_token("refresh token record expired"));
        }

        if record.id != claims.token_id {
            warn!(
                token_id = %claims.token_id,
                record_id = %record.id,
                "Refresh token claims do not match stored record"
            );
            return Err(DomainError::invalid_token("refresh token id mismatch"));
        }

        Ok((claims, record))
    }

    /// Delete the record; losing the race means the token was already used
    async fn consume(&self, record: &RefreshTokenRecord) -> DomainResult<()> {
        let deleted = with_timeout(
            self.store_timeout,
            "delete_refresh_token",
            self.tokens.delete_refresh_token(record.id),
        )
        .await?;

        if !deleted {
            warn!(
                user_id = %record.user_id,
                token_id = %record.id,
                "Refresh token already consumed"
            );
            return Err(DomainError::invalid_token("refresh token already consumed"));
        }
        Ok(())
    }

    async fn revoke_access_token(&self, token: &str) -> AccessRevocation {
        match self.codec.verify_access(token) {
            Ok(claims) => self.blacklist.revoke(token, claims.expires_at()).await,
            // Already expired or never valid: nothing left to block
            Err(_) => AccessRevocation::NotRequired,
        }
    }
}
