//! User route handlers
//!
//! Both endpoints sit behind `JwtAuth`; the listing additionally requires
//! the `ADMIN` role.

pub mod list;
pub mod me;
