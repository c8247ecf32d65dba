//! Unit tests for registration and login

use crate::domain::entities::user::Role;
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use crate::services::test_support::Harness;

#[tokio::test]
async fn test_register_normalizes_email_and_hashes_password() {
    let h = Harness::new();

    let user = h.auth.register("  Alice@Example.COM ", "  password123  ").await.unwrap();

    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Role::User);
    assert_ne!(user.password_hash, "password123");
    assert!(user.password_hash.starts_with("$2"));
    assert!(h.users.find_by_email("alice@example.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let h = Harness::new();

    let err = h.auth.register("not-an-email", "password123").await.unwrap_err();
    assert_eq!(err, DomainError::validation("invalid email format"));

    let err = h.auth.register("bob@example.com", "  short  ").await.unwrap_err();
    assert_eq!(
        err,
        DomainError::validation("password must be at least 8 characters long")
    );
}

#[tokio::test]
async fn test_register_rejects_password_bcrypt_would_truncate() {
    let h = Harness::new();
    let password = format!("{}first-suffix", "a".repeat(72));

    let err = h.auth.register("grace@example.com", &password).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::validation("password must be at most 72 bytes long")
    );
    assert!(h.users.find_by_email("grace@example.com").await.unwrap().is_none());

    // Exactly 72 bytes is still accepted
    h.auth.register("grace@example.com", &"a".repeat(72)).await.unwrap();
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let h = Harness::new();
    h.auth.register("carol@example.com", "password123").await.unwrap();

    let err = h.auth.register("CAROL@example.com", "otherpass123").await.unwrap_err();
    assert_eq!(err, DomainError::Conflict);
}

#[tokio::test]
async fn test_login_issues_pair_for_valid_credentials() {
    let h = Harness::new();
    let user = h.auth.register("dave@example.com", "password123").await.unwrap();

    let pair = h.auth.login(" DAVE@example.com", "password123 ").await.unwrap();
    let claims = h.codec.verify_access(&pair.access_token).unwrap();

    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.email, "dave@example.com");
    assert_eq!(h.tokens.len().await, 1);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = Harness::new();
    h.auth.register("erin@example.com", "password123").await.unwrap();

    let wrong_password = h.auth.login("erin@example.com", "password124").await.unwrap_err();
    let unknown_email = h.auth.login("nobody@example.com", "password123").await.unwrap_err();

    assert_eq!(wrong_password, DomainError::InvalidCredentials);
    assert_eq!(unknown_email, DomainError::InvalidCredentials);
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(h.tokens.len().await, 0);
}

#[tokio::test]
async fn test_login_store_failure_is_internal() {
    let h = Harness::new();
    h.users.set_failing(true);

    let err = h.auth.login("frank@example.com", "password123").await.unwrap_err();
    assert!(err.is_internal());
}

#[tokio::test]
async fn test_list_users() {
    let h = Harness::new();
    h.user("one@example.com", Role::User).await;
    h.user("two@example.com", Role::Admin).await;

    let users = h.auth.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
}
