//! Registration and login

use std::sync::Arc;
use std::time::Duration;

use aegis_shared::validation::{
    is_password_too_long, is_valid_email, is_valid_password, normalize_email,
};
use tracing::{info, warn};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::password::{hash_password, verify_dummy, verify_password};
use crate::services::store::with_timeout;
use crate::services::token::TokenIssuer;

/// Authentication service for account creation and credential login
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Issues the pair returned by a successful login
    issuer: Arc<TokenIssuer<T>>,
    store_timeout: Duration,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(user_repository: Arc<U>, issuer: Arc<TokenIssuer<T>>, store_timeout: Duration) -> Self {
        Self {
            user_repository,
            issuer,
            store_timeout,
        }
    }

    /// Register a new account with the `USER` role
    ///
    /// # Returns
    /// * `Ok(User)` - The created account
    /// * `Err(DomainError::Validation)` - Malformed email, or a password outside 8..=72 bytes
    /// * `Err(DomainError::Conflict)` - The email is taken
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = normalize_email(email);
        let password = password.trim();

        if !is_valid_email(&email) {
            return Err(DomainError::validation("invalid email format"));
        }
        if !is_valid_password(password) {
            return Err(DomainError::validation(
                "password must be at least 8 characters long",
            ));
        }
        if is_password_too_long(password) {
            return Err(DomainError::validation(
                "password must be at most 72 bytes long",
            ));
        }

        let exists = with_timeout(
            self.store_timeout,
            "exists_by_email",
            self.user_repository.exists_by_email(&email),
        )
        .await?;
        if exists {
            return Err(DomainError::Conflict);
        }

        let password_hash = hash_password(password).await?;

        // A concurrent registration can still win between the check and the
        // insert; the repository reports that as Conflict.
        let user = with_timeout(
            self.store_timeout,
            "create_user",
            self.user_repository.create(User::new(email, password_hash)),
        )
        .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue a token pair
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller, including in response time.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let email = normalize_email(email);
        let password = password.trim();

        let user = with_timeout(
            self.store_timeout,
            "find_user_by_email",
            self.user_repository.find_by_email(&email),
        )
        .await?;

        let user = match user {
            Some(user) => user,
            None => {
                verify_dummy(password).await;
                return Err(DomainError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash).await {
            warn!(user_id = %user.id, "Login rejected: bad password");
            return Err(DomainError::InvalidCredentials);
        }

        let pair = self.issuer.issue(&user.identity()).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// All accounts, for administrators
    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        with_timeout(
            self.store_timeout,
            "list_users",
            self.user_repository.list_users(),
        )
        .await
    }
}
