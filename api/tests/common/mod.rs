//! Shared wiring for the HTTP tests: every service backed by the in-memory stores

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header::AUTHORIZATION, test::TestRequest, web};
use aegis_api::routes::{health::HealthChecks, AppState};
use aegis_core::domain::entities::Role;
use aegis_core::repositories::UserRepository;
use aegis_core::services::{
    AuthEnforcer, AuthService, TokenBlacklist, TokenCodec, TokenIssuer, TokenService,
    DEFAULT_STORE_TIMEOUT,
};
use aegis_infra::memory::{InMemoryRevocationCache, InMemoryTokenRepository, InMemoryUserRepository};
use serde_json::{json, Value};

pub const ACCESS_SECRET: &str = "api-test-access-secret-0123456789";
pub const REFRESH_SECRET: &str = "api-test-refresh-secret-9876543210";
pub const JSON_LIMIT: usize = 16 * 1024;
pub const PASSWORD: &str = "longenough1";

pub type MemoryState =
    AppState<InMemoryTokenRepository, InMemoryUserRepository, InMemoryRevocationCache>;

pub struct TestContext {
    pub state: web::Data<MemoryState>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub cache: Arc<InMemoryRevocationCache>,
}

impl TestContext {
    pub fn new() -> Self {
        let codec = Arc::new(TokenCodec::new(ACCESS_SECRET, REFRESH_SECRET).unwrap());
        let tokens = Arc::new(InMemoryTokenRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let cache = Arc::new(InMemoryRevocationCache::new());

        let issuer = Arc::new(TokenIssuer::new(
            codec.clone(),
            tokens.clone(),
            DEFAULT_STORE_TIMEOUT,
        ));
        let blacklist = Arc::new(TokenBlacklist::new(cache.clone(), DEFAULT_STORE_TIMEOUT));
        let token_service = Arc::new(TokenService::new(
            codec.clone(),
            issuer.clone(),
            tokens.clone(),
            users.clone(),
            blacklist.clone(),
            DEFAULT_STORE_TIMEOUT,
        ));
        let enforcer = Arc::new(AuthEnforcer::new(codec, blacklist));
        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            issuer,
            DEFAULT_STORE_TIMEOUT,
        ));

        let state = web::Data::new(AppState {
            auth_service,
            token_service,
            enforcer,
            health: HealthChecks::new(),
        });

        Self {
            state,
            tokens,
            users,
            cache,
        }
    }

    /// Give an already registered account the `ADMIN` role
    pub async fn promote(&self, email: &str) {
        let user = self
            .users
            .find_by_email(email)
            .await
            .unwrap()
            .expect("user must be registered first");
        self.users.upsert(user.with_role(Role::Admin)).await;
    }
}

pub fn post_json(uri: &str, body: Value) -> TestRequest {
    TestRequest::post().uri(uri).set_json(body)
}

pub fn credentials(email: &str) -> Value {
    json!({ "email": email, "password": PASSWORD })
}

pub fn bearer(request: TestRequest, token: &str) -> TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {}", token)))
}

/// Register and log in through the HTTP surface; yields `(access, refresh)`
macro_rules! sign_up {
    ($app:expr, $email:expr) => {{
        let resp = actix_web::test::call_service(
            $app,
            common::post_json("/api/v1/auth/register", common::credentials($email)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);

        let resp = actix_web::test::call_service(
            $app,
            common::post_json("/api/v1/auth/login", common::credentials($email)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (
            body["access_token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }};
}
