//! HS256 token codec with separate secrets for access and refresh tokens.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::token::{AccessClaims, RefreshClaims};
use crate::domain::entities::user::Identity;
use crate::errors::{DomainError, DomainResult};

use super::config::TokenServiceConfig;

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    /// `None` for an empty secret, which then fails closed on every use
    fn from_secret(secret: &str) -> Option<Self> {
        if secret.is_empty() {
            return None;
        }
        Some(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }
}

#[derive(Clone, Copy)]
enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// Encodes and verifies access and refresh tokens
///
/// Only HS256 is accepted. Expiry is checked without leeway and `exp` is
/// mandatory.
pub struct TokenCodec {
    access: Option<SigningKeys>,
    refresh: Option<SigningKeys>,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec from both secrets
    ///
    /// Fails if the two secrets are identical. An empty secret is accepted here
    /// but makes every issue and verify of that token class fail.
    pub fn new(access_secret: &str, refresh_secret: &str) -> DomainResult<Self> {
        if !access_secret.is_empty() && access_secret == refresh_secret {
            return Err(DomainError::internal(
                "access and refresh token secrets must differ",
            ));
        }
        if access_secret.is_empty() {
            warn!("Access token secret is empty; access tokens cannot be issued or verified");
        }
        if refresh_secret.is_empty() {
            warn!("Refresh token secret is empty; refresh tokens cannot be issued or verified");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            access: SigningKeys::from_secret(access_secret),
            refresh: SigningKeys::from_secret(refresh_secret),
            validation,
        })
    }

    pub fn from_config(config: &TokenServiceConfig) -> DomainResult<Self> {
        Self::new(&config.access_secret, &config.refresh_secret)
    }

    /// Issue an access token for `identity`, valid for 15 minutes
    pub fn issue_access(&self, identity: &Identity) -> DomainResult<(String, AccessClaims)> {
        self.issue_access_at(identity, Utc::now())
    }

    /// Issue an access token as if the current time were `now`
    pub fn issue_access_at(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> DomainResult<(String, AccessClaims)> {
        let claims = AccessClaims::new(identity, now);
        let token = self.sign(TokenKind::Access, &claims)?;
        Ok((token, claims))
    }

    /// Issue a refresh token bound to the record `token_id`, valid for 7 days
    pub fn issue_refresh(&self, user_id: Uuid, token_id: Uuid) -> DomainResult<String> {
        self.issue_refresh_at(user_id, token_id, Utc::now())
    }

    pub fn issue_refresh_at(
        &self,
        user_id: Uuid,
        token_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<String> {
        let claims = RefreshClaims::new(user_id, token_id, now);
        self.sign(TokenKind::Refresh, &claims)
    }

    /// Verify an access token
    pub fn verify_access(&self, token: &str) -> DomainResult<AccessClaims> {
        let claims: AccessClaims = self.verify(TokenKind::Access, token)?;
        ensure_not_expired(TokenKind::Access, claims.exp)?;
        Ok(claims)
    }

    /// Verify a refresh token
    pub fn verify_refresh(&self, token: &str) -> DomainResult<RefreshClaims> {
        let claims: RefreshClaims = self.verify(TokenKind::Refresh, token)?;
        ensure_not_expired(TokenKind::Refresh, claims.exp)?;
        Ok(claims)
    }

    fn keys(&self, kind: TokenKind) -> Option<&SigningKeys> {
        match kind {
            TokenKind::Access => self.access.as_ref(),
            TokenKind::Refresh => self.refresh.as_ref(),
        }
    }

    fn sign<T: Serialize>(&self, kind: TokenKind, claims: &T) -> DomainResult<String> {
        let keys = self.keys(kind).ok_or_else(|| {
            DomainError::internal(format!("{} token secret not configured", kind.as_str()))
        })?;

        encode(&Header::new(Algorithm::HS256), claims, &keys.encoding).map_err(|e| {
            DomainError::internal(format!("failed to sign {} token: {}", kind.as_str(), e))
        })
    }

    fn verify<T: DeserializeOwned>(&self, kind: TokenKind, token: &str) -> DomainResult<T> {
        let keys = self.keys(kind).ok_or_else(|| {
            DomainError::invalid_token(format!("{} token secret not configured", kind.as_str()))
        })?;

        decode::<T>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "expired",
                    ErrorKind::InvalidSignature => "bad signature",
                    ErrorKind::InvalidAlgorithm => "algorithm not allowed",
                    ErrorKind::MissingRequiredClaim(_) => "missing required claim",
                    ErrorKind::Json(_) => "malformed claims",
                    _ => "malformed token",
                };
                DomainError::invalid_token(format!("{} token rejected: {}", kind.as_str(), reason))
            })
    }
}

fn ensure_not_expired(kind: TokenKind, exp: i64) -> DomainResult<()> {
    if Utc::now().timestamp() >= exp {
        return Err(DomainError::invalid_token(format!(
            "{} token rejected: expired",
            kind.as_str()
        )));
    }
    Ok(())
}

/// Cheap syntactic check: three non-empty base64url segments
///
/// Used to reject obvious garbage before any cache lookup or signature work.
pub fn is_well_formed(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
}
