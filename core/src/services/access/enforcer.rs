//! Request-time access token enforcement

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::user::Role;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::RevocationCache;
use crate::services::token::{is_well_formed, TokenBlacklist, TokenCodec};

/// Identity of an authenticated request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthContext {
    /// Reject with `Forbidden` unless the caller holds `role`
    pub fn require_role(&self, role: Role) -> DomainResult<()> {
        if self.role != role {
            warn!(user_id = %self.user_id, required = %role, actual = %self.role, "Role check failed");
            return Err(DomainError::Forbidden);
        }
        Ok(())
    }
}

/// Extract the token from an `Authorization` header value
///
/// The value must be exactly `Bearer <token>`: one space, the scheme spelled
/// exactly, and a non-empty token without whitespace.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || scheme != "Bearer" {
        return None;
    }
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// Gate for protected requests
///
/// Rejections are all `Unauthorized`; the reason is logged, not returned.
pub struct AuthEnforcer<C: RevocationCache> {
    codec: Arc<TokenCodec>,
    blacklist: Arc<TokenBlacklist<C>>,
}

impl<C: RevocationCache> AuthEnforcer<C> {
    pub fn new(codec: Arc<TokenCodec>, blacklist: Arc<TokenBlacklist<C>>) -> Self {
        Self { codec, blacklist }
    }

    /// Authenticate from a raw `Authorization` header value
    pub async fn authenticate_header(&self, header: Option<&str>) -> DomainResult<AuthContext> {
        let token = header
            .and_then(extract_bearer_token)
            .ok_or(DomainError::Unauthorized)?;
        self.authenticate(token).await
    }

    /// Authenticate a bare access token
    pub async fn authenticate(&self, token: &str) -> DomainResult<AuthContext> {
        if !is_well_formed(token) {
            debug!("Rejected malformed bearer token");
            return Err(DomainError::Unauthorized);
        }

        match self.blacklist.is_revoked(token).await {
            Ok(false) => {}
            Ok(true) => {
                debug!("Rejected revoked access token");
                return Err(DomainError::Unauthorized);
            }
            Err(e) => {
                warn!(error = ?e.detail(), "Revocation lookup failed; rejecting request");
                return Err(DomainError::Unauthorized);
            }
        }

        let claims = self.codec.verify_access(token).map_err(|e| {
            debug!(error = ?e.detail(), "Rejected access token");
            DomainError::Unauthorized
        })?;

        Ok(AuthContext {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}
