//! Application factory
//!
//! Builds the actix-web `App` from already constructed services. Store
//! handles are created by the caller and reach handlers only through
//! [`AppState`].

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use aegis_core::repositories::{RevocationCache, TokenRepository, UserRepository};
use aegis_shared::{error_codes, ErrorResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::json_config;
use crate::middleware::{Authenticator, JwtAuth, RequireRole};
use crate::routes::{
    auth::{login::login, logout::logout, refresh::refresh, register::register},
    health::health_check,
    users::{list::list_users, me::me},
    AppState,
};

/// Create the application with all routes and middleware
///
/// `json_limit` caps request bodies in bytes.
pub fn create_app<T, U, C>(
    app_state: web::Data<AppState<T, U, C>>,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    T: TokenRepository + 'static,
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let authenticator: Arc<dyn Authenticator> = app_state.enforcer.clone();
    let jwt_auth = JwtAuth::new(authenticator);

    App::new()
        .app_data(app_state)
        .app_data(json_config(json_limit))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<T, U, C>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<T, U, C>))
                        .route("/login", web::post().to(login::<T, U, C>))
                        .route("/refresh", web::post().to(refresh::<T, U, C>))
                        .route("/logout", web::post().to(logout::<T, U, C>)),
                )
                .service(
                    web::scope("/users")
                        .wrap(jwt_auth)
                        .route("/me", web::get().to(me))
                        .service(
                            web::resource("")
                                .wrap(RequireRole::admin())
                                .route(web::get().to(list_users::<T, U, C>)),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(error_codes::NOT_FOUND, "not found"))
}
