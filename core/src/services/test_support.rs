//! Shared wiring for service tests

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::user::{Role, User};
use crate::repositories::{MockRevocationCache, MockTokenRepository, MockUserRepository};
use crate::services::access::AuthEnforcer;
use crate::services::auth::AuthService;
use crate::services::store::DEFAULT_STORE_TIMEOUT;
use crate::services::token::{TokenBlacklist, TokenCodec, TokenIssuer, TokenService};

pub const ACCESS_SECRET: &str = "test-access-secret-0123456789abcdef";
pub const REFRESH_SECRET: &str = "test-refresh-secret-fedcba9876543210";

pub type MockTokenService = TokenService<MockTokenRepository, MockUserRepository, MockRevocationCache>;

/// Every service wired to the in-memory mocks
pub struct Harness {
    pub codec: Arc<TokenCodec>,
    pub tokens: Arc<MockTokenRepository>,
    pub users: Arc<MockUserRepository>,
    pub cache: Arc<MockRevocationCache>,
    pub issuer: Arc<TokenIssuer<MockTokenRepository>>,
    pub service: Arc<MockTokenService>,
    pub enforcer: AuthEnforcer<MockRevocationCache>,
    pub auth: AuthService<MockUserRepository, MockTokenRepository>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store_timeout(DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_store_timeout(store_timeout: Duration) -> Self {
        let codec = Arc::new(TokenCodec::new(ACCESS_SECRET, REFRESH_SECRET).unwrap());
        let tokens = Arc::new(MockTokenRepository::new());
        let users = Arc::new(MockUserRepository::new());
        let cache = Arc::new(MockRevocationCache::new());

        let issuer = Arc::new(TokenIssuer::new(codec.clone(), tokens.clone(), store_timeout));
        let blacklist = Arc::new(TokenBlacklist::new(cache.clone(), store_timeout));
        let service = Arc::new(TokenService::new(
            codec.clone(),
            issuer.clone(),
            tokens.clone(),
            users.clone(),
            blacklist.clone(),
            store_timeout,
        ));
        let enforcer = AuthEnforcer::new(codec.clone(), blacklist);
        let auth = AuthService::new(users.clone(), issuer.clone(), store_timeout);

        Self {
            codec,
            tokens,
            users,
            cache,
            issuer,
            service,
            enforcer,
            auth,
        }
    }

    /// Store a user whose password hash is never checked
    pub async fn user(&self, email: &str, role: Role) -> User {
        let user = User::new(email.to_string(), "unused-hash".to_string()).with_role(role);
        self.users.insert(user.clone()).await;
        user
    }
}
