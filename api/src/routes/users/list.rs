use actix_web::{web, HttpResponse};
use aegis_core::repositories::{RevocationCache, TokenRepository, UserRepository};
use tracing::{error, info};

use crate::dto::UserListItem;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::Authenticated;
use crate::routes::AppState;

/// Handler for GET /api/v1/users
///
/// ## Errors
/// - 401 Unauthorized: No valid access token
/// - 403 Forbidden: Caller is not an administrator
pub async fn list_users<T, U, C>(
    state: web::Data<AppState<T, U, C>>,
    auth: Authenticated,
) -> HttpResponse
where
    T: TokenRepository + 'static,
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    match state.auth_service.list_users().await {
        Ok(users) => {
            info!(admin_id = %auth.user_id, user_count = users.len(), "Users listed");
            let body: Vec<UserListItem> = users.into_iter().map(UserListItem::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            error!(admin_id = %auth.user_id, "Failed to fetch users");
            handle_domain_error(&err)
        }
    }
}
