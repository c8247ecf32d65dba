//! Authentication route handlers
//!
//! This module contains the credential and session endpoints:
//! - Registration and login
//! - Refresh token rotation
//! - Logout

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
