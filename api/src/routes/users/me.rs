use actix_web::HttpResponse;
use tracing::info;

use crate::dto::ProfileResponse;
use crate::middleware::auth::Authenticated;

/// Handler for GET /api/v1/users/me
///
/// Answers from the access token alone; the user store is not consulted.
pub async fn me(auth: Authenticated) -> HttpResponse {
    info!(user_id = %auth.user_id, "Profile accessed");
    HttpResponse::Ok().json(ProfileResponse::from(auth.into_inner()))
}
