use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use aegis_core::repositories::{RevocationCache, TokenRepository, UserRepository};
use aegis_core::services::extract_bearer_token;
use tracing::{debug, warn};
use validator::Validate;

use crate::dto::{LogoutRequest, MessageResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the refresh token in the body. An access token sent as
/// `Authorization: Bearer` is blacklisted for the rest of its lifetime; the
/// header is optional and a failure to blacklist does not fail the logout.
///
/// ## Success (200 OK)
/// ```json
/// { "message": "logged out successfully" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing refresh token
/// - 401 Unauthorized: Invalid, expired or already revoked refresh token
pub async fn logout<T, U, C>(
    req: HttpRequest,
    state: web::Data<AppState<T, U, C>>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    T: TokenRepository + 'static,
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(&errors);
    }

    let access_token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer_token);

    match state
        .token_service
        .revoke_tokens(&request.refresh_token, access_token)
        .await
    {
        Ok(outcome) => {
            debug!(access = ?outcome.access, "Logout completed");
            HttpResponse::Ok().json(MessageResponse::new("logged out successfully"))
        }
        Err(error) => {
            warn!(error = %error, "Logout failed");
            handle_domain_error(&error)
        }
    }
}
