//! Business services containing domain logic and use cases.

pub mod access;
pub mod auth;
pub mod password;
pub mod store;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use access::{extract_bearer_token, AuthContext, AuthEnforcer};
pub use auth::AuthService;
pub use password::{hash_password, verify_password, BCRYPT_COST};
pub use store::{with_timeout, DEFAULT_STORE_TIMEOUT};
pub use token::{
    CleanupResult, TokenBlacklist, TokenCleanupConfig, TokenCleanupService, TokenCodec,
    TokenIssuer, TokenService, TokenServiceConfig,
};
