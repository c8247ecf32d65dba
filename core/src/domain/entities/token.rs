//! Token entities for JWT-based session credentials.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Identity, Role};

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Claims carried by a short-lived access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Unique per-token id, so two tokens issued in the same second differ
    pub jti: String,
}

impl AccessClaims {
    /// Creates access claims for `identity`, issued at `now`
    pub fn new(identity: &Identity, now: DateTime<Utc>) -> Self {
        let expiry = now + Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES);

        Self {
            user_id: identity.user_id,
            email: identity.email.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Claims carried by a long-lived refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub user_id: Uuid,

    /// Id of the persisted refresh token record this token belongs to
    pub token_id: Uuid,

    pub iat: i64,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(user_id: Uuid, token_id: Uuid, now: DateTime<Utc>) -> Self {
        let expiry = now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS);

        Self {
            user_id,
            token_id,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }
}

/// Refresh token record stored in the database
///
/// The record's existence is what makes a refresh token usable: rotation and
/// logout both delete it, and only the caller whose delete succeeds proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique identifier, equal to the `token_id` claim of the token
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// The exact encoded refresh token
    pub token: String,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a record for a freshly issued token, expiring 7 days after `now`
    pub fn new(id: Uuid, user_id: Uuid, token: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            token,
            expires_at: now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            created_at: now,
        }
    }

    /// Checks if the record has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks expiry against an explicit clock
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: ACCESS_TOKEN_EXPIRY_MINUTES * 60,
            refresh_expires_in: REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn test_access_claims_lifetime() {
        let now = Utc::now();
        let claims = AccessClaims::new(&identity(), now);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_MINUTES * 60);
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }

    #[test]
    fn test_access_claims_have_unique_jti() {
        let now = Utc::now();
        let id = identity();
        assert_ne!(AccessClaims::new(&id, now).jti, AccessClaims::new(&id, now).jti);
    }

    #[test]
    fn test_refresh_claims_lifetime() {
        let now = Utc::now();
        let claims = RefreshClaims::new(Uuid::new_v4(), Uuid::new_v4(), now);
        assert_eq!(claims.exp - claims.iat, REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_record_expiry() {
        let now = Utc::now();
        let record = RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), "t".into(), now);
        assert!(!record.is_expired_at(now));
        assert!(!record.is_expired_at(now + Duration::days(6)));
        assert!(record.is_expired_at(now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS)));
    }

    #[test]
    fn test_record_issued_eight_days_ago_is_expired() {
        let past = Utc::now() - Duration::days(8);
        let record = RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), "t".into(), past);
        assert!(record.is_expired());
    }

    #[test]
    fn test_token_pair_lifetimes() {
        let pair = TokenPair::new("a".into(), "r".into());
        assert_eq!(pair.access_expires_in, 900);
        assert_eq!(pair.refresh_expires_in, 604_800);
    }
}
