//! Bearer token authentication middleware for protected endpoints.
//!
//! The middleware hands the raw `Authorization` header to an
//! [`Authenticator`] (the core `AuthEnforcer` in production), injects the
//! resulting `AuthContext` into the request extensions and answers every
//! rejection with a JSON 401 without calling the wrapped service.

use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use aegis_core::{
    errors::{DomainError, DomainResult},
    repositories::RevocationCache,
    services::{AuthContext, AuthEnforcer},
};
use futures_util::future::LocalBoxFuture;

use crate::handlers::error::{handle_domain_error, ApiError};

/// Object-safe view of the request-time enforcer
pub trait Authenticator: Send + Sync {
    fn authenticate<'a>(
        &'a self,
        header: Option<&'a str>,
    ) -> LocalBoxFuture<'a, DomainResult<AuthContext>>;
}

impl<C: RevocationCache + 'static> Authenticator for AuthEnforcer<C> {
    fn authenticate<'a>(
        &'a self,
        header: Option<&'a str>,
    ) -> LocalBoxFuture<'a, DomainResult<AuthContext>> {
        Box::pin(self.authenticate_header(header))
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    authenticator: Arc<dyn Authenticator>,
}

impl JwtAuth {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            authenticator: Arc::clone(&self.authenticator),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<dyn Authenticator>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = Arc::clone(&self.authenticator);

        Box::pin(async move {
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            match authenticator.authenticate(header.as_deref()).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extractor for the authenticated caller
///
/// Fails with 401 on routes not wrapped in [`JwtAuth`].
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthContext);

impl Authenticated {
    pub fn into_inner(self) -> AuthContext {
        self.0
    }
}

impl Deref for Authenticated {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| ApiError(DomainError::Unauthorized).into());

        ready(result)
    }
}
