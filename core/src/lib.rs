//! # Aegis Core
//!
//! Domain layer for the Aegis session credential service: token issuance,
//! single-use refresh rotation, logout with access token blacklisting,
//! credential verification and request-time enforcement. Storage is reached
//! only through the repository and cache traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
