//! Domain entities representing core business objects.

pub mod token;
pub mod user;

pub use token::{
    AccessClaims, RefreshClaims, RefreshTokenRecord, TokenPair,
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{Identity, Role, User};
