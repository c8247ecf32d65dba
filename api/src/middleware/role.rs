//! Role guard for endpoints restricted to one role.
//!
//! Must sit inside [`JwtAuth`](super::auth::JwtAuth), which supplies the
//! `AuthContext` it inspects.

use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use aegis_core::{domain::entities::Role, errors::DomainError, services::AuthContext};
use futures_util::future::LocalBoxFuture;

use crate::handlers::error::handle_domain_error;

/// Middleware factory rejecting callers without `role`
#[derive(Debug, Clone, Copy)]
pub struct RequireRole {
    role: Role,
}

impl RequireRole {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn admin() -> Self {
        Self::new(Role::Admin)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            role: self.role,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    role: Role,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let role = self.role;

        Box::pin(async move {
            // Missing context means the route was not authenticated at all
            let decision = match req.extensions().get::<AuthContext>() {
                Some(context) => context.require_role(role),
                None => Err(DomainError::Unauthorized),
            };

            match decision {
                Ok(()) => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                Err(error) => {
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
