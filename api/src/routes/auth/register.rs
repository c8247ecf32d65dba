use actix_web::{web, HttpResponse};
use aegis_core::repositories::{RevocationCache, TokenRepository, UserRepository};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::{MessageResponse, RegisterRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "password": "at-least-8-chars"
/// }
/// ```
///
/// ## Success (201 Created)
/// ```json
/// { "message": "user registered successfully" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed body, missing field, invalid email or bad password length
/// - 409 Conflict: Email already registered
pub async fn register<T, U, C>(
    state: web::Data<AppState<T, U, C>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    T: TokenRepository + 'static,
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .register(&request.email, &request.password)
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            HttpResponse::Created().json(MessageResponse::new("user registered successfully"))
        }
        Err(error) => {
            warn!(error = %error, "User registration failed");
            handle_domain_error(&error)
        }
    }
}
