//! Access enforcement for protected requests

mod enforcer;

pub use enforcer::{extract_bearer_token, AuthContext, AuthEnforcer};
