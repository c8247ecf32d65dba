use actix_web::{web, HttpResponse};
use aegis_core::repositories::{RevocationCache, TokenRepository, UserRepository};
use validator::Validate;

use crate::dto::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new pair. The presented token is
/// consumed: presenting it again fails.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing refresh token
/// - 401 Unauthorized: Invalid, expired or already used refresh token
/// - 500 Internal Server Error: Store failure
pub async fn refresh<T, U, C>(
    state: web::Data<AppState<T, U, C>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    T: TokenRepository + 'static,
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(&errors);
    }

    match state.token_service.refresh_tokens(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
