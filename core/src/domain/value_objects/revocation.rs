//! Outcome of a logout, reported to the caller instead of being swallowed.

use serde::Serialize;

/// What happened to the access token presented alongside a logout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccessRevocation {
    /// Blacklisted for the rest of its lifetime
    Blacklisted,
    /// No access token was presented, or it had already expired
    NotRequired,
    /// The refresh token was revoked but the access token could not be
    /// blacklisted; it stays usable until it expires
    Failed {
        #[serde(skip)]
        detail: String,
    },
}

/// Result of a successful logout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevocationOutcome {
    /// Always true when returned: the refresh token record was deleted
    pub refresh_revoked: bool,
    pub access: AccessRevocation,
}

impl RevocationOutcome {
    pub fn new(access: AccessRevocation) -> Self {
        Self {
            refresh_revoked: true,
            access,
        }
    }

    /// Whether the presented access token is now unusable
    pub fn is_complete(&self) -> bool {
        !matches!(self.access, AccessRevocation::Failed { .. })
    }
}
