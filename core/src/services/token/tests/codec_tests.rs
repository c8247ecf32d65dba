//! Unit tests for the token codec

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::{AccessClaims, REFRESH_TOKEN_EXPIRY_DAYS};
use crate::domain::entities::user::{Identity, Role};
use crate::errors::DomainError;
use crate::services::test_support::{ACCESS_SECRET, REFRESH_SECRET};
use crate::services::token::{is_well_formed, TokenCodec};

fn codec() -> TokenCodec {
    TokenCodec::new(ACCESS_SECRET, REFRESH_SECRET).unwrap()
}

fn identity(role: Role) -> Identity {
    Identity {
        user_id: Uuid::new_v4(),
        email: "alice@example.com".to_string(),
        role,
    }
}

fn is_invalid_token(err: &DomainError) -> bool {
    matches!(err, DomainError::InvalidToken { .. })
}

#[test]
fn test_access_token_round_trip_carries_identity() {
    let codec = codec();
    let identity = identity(Role::Admin);

    let (token, issued) = codec.issue_access(&identity).unwrap();
    let claims = codec.verify_access(&token).unwrap();

    assert_eq!(claims, issued);
    assert_eq!(claims.user_id, identity.user_id);
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.role, Role::Admin);
    assert!(is_well_formed(&token));
}

#[test]
fn test_refresh_token_round_trip_carries_token_id() {
    let codec = codec();
    let user_id = Uuid::new_v4();
    let token_id = Uuid::new_v4();

    let token = codec.issue_refresh(user_id, token_id).unwrap();
    let claims = codec.verify_refresh(&token).unwrap();

    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.token_id, token_id);
    assert_eq!(claims.exp - claims.iat, REFRESH_TOKEN_EXPIRY_DAYS * 86_400);
}

#[test]
fn test_token_classes_are_not_interchangeable() {
    let codec = codec();
    let (access, _) = codec.issue_access(&identity(Role::User)).unwrap();
    let refresh = codec.issue_refresh(Uuid::new_v4(), Uuid::new_v4()).unwrap();

    assert!(is_invalid_token(&codec.verify_refresh(&access).unwrap_err()));
    assert!(is_invalid_token(&codec.verify_access(&refresh).unwrap_err()));
}

#[test]
fn test_expired_tokens_are_rejected() {
    let codec = codec();
    let (access, _) = codec
        .issue_access_at(&identity(Role::User), Utc::now() - Duration::minutes(16))
        .unwrap();
    let refresh = codec
        .issue_refresh_at(Uuid::new_v4(), Uuid::new_v4(), Utc::now() - Duration::days(8))
        .unwrap();

    assert!(is_invalid_token(&codec.verify_access(&access).unwrap_err()));
    assert!(is_invalid_token(&codec.verify_refresh(&refresh).unwrap_err()));
}

#[test]
fn test_no_leeway_at_expiry_boundary() {
    let codec = codec();
    // exp lands exactly on the current second
    let (access, _) = codec
        .issue_access_at(&identity(Role::User), Utc::now() - Duration::minutes(15))
        .unwrap();

    assert!(codec.verify_access(&access).is_err());
}

#[test]
fn test_unsigned_token_is_rejected() {
    let codec = codec();
    let header = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";
    let payload = "eyJ1c2VyX2lkIjoiNmYxYzlhOGUtMmI0ZC00YzFlLTlmM2EtN2Q1ZThiMmMxYTkwIiwiZW1haWwiOiJtYWxsb3J5QGV4YW1wbGUuY29tIiwicm9sZSI6IkFETUlOIiwiaWF0IjoxNzAwMDAwMDAwLCJleHAiOjQxMDI0NDQ4MDAsImp0aSI6ImZvcmdlZCJ9";

    assert!(codec.verify_access(&format!("{}.{}.", header, payload)).is_err());
    assert!(codec.verify_access(&format!("{}.{}.c2ln", header, payload)).is_err());
}

#[test]
fn test_other_hmac_algorithms_are_rejected() {
    let codec = codec();
    let claims = AccessClaims::new(&identity(Role::Admin), Utc::now());

    for alg in [Algorithm::HS384, Algorithm::HS512] {
        let token = encode(
            &Header::new(alg),
            &claims,
            &EncodingKey::from_secret(ACCESS_SECRET.as_bytes()),
        )
        .unwrap();
        assert!(is_invalid_token(&codec.verify_access(&token).unwrap_err()));
    }
}

#[test]
fn test_tampered_payload_is_rejected() {
    let codec = codec();
    let (token, _) = codec.issue_access(&identity(Role::User)).unwrap();
    let forged_payload = "eyJ1c2VyX2lkIjoiNmYxYzlhOGUtMmI0ZC00YzFlLTlmM2EtN2Q1ZThiMmMxYTkwIiwiZW1haWwiOiJtYWxsb3J5QGV4YW1wbGUuY29tIiwicm9sZSI6IkFETUlOIiwiaWF0IjoxNzAwMDAwMDAwLCJleHAiOjQxMDI0NDQ4MDAsImp0aSI6ImZvcmdlZCJ9";

    let parts: Vec<&str> = token.split('.').collect();
    let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

    assert!(is_invalid_token(&codec.verify_access(&forged).unwrap_err()));
}

#[test]
fn test_token_from_other_secret_is_rejected() {
    let other = TokenCodec::new("another-access-secret", "another-refresh-secret").unwrap();
    let (token, _) = other.issue_access(&identity(Role::User)).unwrap();

    assert!(codec().verify_access(&token).is_err());
}

#[test]
fn test_identical_secrets_are_refused() {
    let err = TokenCodec::new("shared-secret", "shared-secret").err().unwrap();
    assert!(err.is_internal());
}

#[test]
fn test_empty_secret_fails_closed() {
    let codec = TokenCodec::new("", REFRESH_SECRET).unwrap();
    let err = codec.issue_access(&identity(Role::User)).unwrap_err();
    assert!(err.is_internal());

    let (valid_elsewhere, _) = self::codec().issue_access(&identity(Role::User)).unwrap();
    assert!(is_invalid_token(&codec.verify_access(&valid_elsewhere).unwrap_err()));

    // The refresh side still works
    let refresh = codec.issue_refresh(Uuid::new_v4(), Uuid::new_v4()).unwrap();
    assert!(codec.verify_refresh(&refresh).is_ok());
}

#[test]
fn test_same_second_access_tokens_differ() {
    let codec = codec();
    let identity = identity(Role::User);
    let now = Utc::now();

    let (a, _) = codec.issue_access_at(&identity, now).unwrap();
    let (b, _) = codec.issue_access_at(&identity, now).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_is_well_formed() {
    assert!(is_well_formed("aGVhZA.cGF5bG9hZA.c2ln"));
    assert!(is_well_formed("a-b_c.d.e"));
    assert!(!is_well_formed(""));
    assert!(!is_well_formed("not-a-token"));
    assert!(!is_well_formed("a.b"));
    assert!(!is_well_formed("a.b.c.d"));
    assert!(!is_well_formed("a..c"));
    assert!(!is_well_formed("a.b."));
    assert!(!is_well_formed("a.b+/.c"));
    assert!(!is_well_formed("a.b=.c"));
}
