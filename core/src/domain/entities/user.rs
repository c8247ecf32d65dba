//! User entity representing an account that can authenticate against the service.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role label carried in access tokens and checked by role guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular account, assigned at registration
    User,
    /// Administrative account
    Admin,
}

impl Role {
    /// Wire and storage label
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role label: {}", other)),
        }
    }
}

/// User entity as stored in the durable store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized (trimmed, lowercased) email address
    pub email: String,

    /// bcrypt hash of the password; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Authorization role
    pub role: Role,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the default `USER` role
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    /// Builder-style role override
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// The identity embedded into issued tokens
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Who a token pair is issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}
