use actix_web::{web, HttpResponse};
use aegis_core::repositories::{RevocationCache, TokenRepository, UserRepository};
use tracing::warn;
use validator::Validate;

use crate::dto::{LoginRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/login
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing email or password
/// - 401 Unauthorized: Unknown email or wrong password, indistinguishably
pub async fn login<T, U, C>(
    state: web::Data<AppState<T, U, C>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    T: TokenRepository + 'static,
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => {
            warn!(error = %error, "Login failed");
            handle_domain_error(&error)
        }
    }
}
