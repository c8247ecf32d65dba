pub mod revocation;
pub mod token;
pub mod user;

pub use revocation::{blacklist_key, RevocationCache, BLACKLIST_KEY_PREFIX};
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use revocation::MockRevocationCache;
#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
