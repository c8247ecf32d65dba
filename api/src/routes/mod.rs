//! Route handlers
//!
//! - `auth` - registration, login, refresh rotation and logout
//! - `users` - the caller's profile and the admin user listing
//! - `health` - service and store health

pub mod auth;
pub mod health;
pub mod users;

use std::sync::Arc;

use aegis_core::repositories::{RevocationCache, TokenRepository, UserRepository};
use aegis_core::services::{AuthEnforcer, AuthService, TokenService};

use self::health::HealthChecks;

/// Services shared by every handler
pub struct AppState<T, U, C>
where
    T: TokenRepository,
    U: UserRepository,
    C: RevocationCache,
{
    pub auth_service: Arc<AuthService<U, T>>,
    pub token_service: Arc<TokenService<T, U, C>>,
    pub enforcer: Arc<AuthEnforcer<C>>,
    pub health: HealthChecks,
}
