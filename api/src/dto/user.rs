use aegis_core::domain::entities::User;
use aegis_core::services::AuthContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The caller's own identity, as carried by their access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl From<AuthContext> for ProfileResponse {
    fn from(context: AuthContext) -> Self {
        Self {
            id: context.user_id,
            email: context.email,
            role: context.role.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListItem {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserListItem {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}
