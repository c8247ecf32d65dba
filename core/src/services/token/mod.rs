//! Token services
//!
//! - HS256 codec with separate access and refresh secrets
//! - Pair issuance backed by a persisted refresh record
//! - Single-use rotation and logout with access token blacklisting
//! - Background cleanup of expired records

mod blacklist;
mod cleanup;
mod codec;
mod config;
mod issuer;
mod service;

#[cfg(test)]
mod tests;

pub use blacklist::TokenBlacklist;
pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use codec::{is_well_formed, TokenCodec};
pub use config::TokenServiceConfig;
pub use issuer::TokenIssuer;
pub use service::TokenService;
