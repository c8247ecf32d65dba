//! Authentication service module
//!
//! - Registration with normalized email and bcrypt-hashed password
//! - Credential login issuing a token pair
//! - Account listing for administrators

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
