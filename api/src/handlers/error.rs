//! Mapping from domain errors to HTTP responses

use std::fmt;

use actix_web::{
    error::InternalError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError,
};
use aegis_core::errors::DomainError;
use aegis_shared::{error_codes, ErrorResponse};
use tracing::{error, warn};
use validator::ValidationErrors;

/// Status code and machine-readable code for a domain error
fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        DomainError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS)
        }
        DomainError::InvalidToken { .. } => (StatusCode::UNAUTHORIZED, error_codes::INVALID_TOKEN),
        DomainError::Unauthorized => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
        DomainError::Forbidden => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
        DomainError::Conflict => (StatusCode::CONFLICT, error_codes::CONFLICT),
        DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

/// Convert a domain error into a JSON error response
///
/// Only the error's display text reaches the client. Internal detail is
/// logged here and dropped.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = classify(error);

    match error {
        DomainError::Internal { message } => error!(detail = %message, "Request failed"),
        DomainError::InvalidToken { detail } => warn!(detail = %detail, "Token rejected"),
        _ => {}
    }

    HttpResponse::build(status).json(ErrorResponse::new(code, error.to_string()))
}

/// Answer a request body that failed `Validate` with 400 `invalid request`
///
/// Field names are logged; field values never are.
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors.field_errors().keys().map(|field| field.to_string()).collect();
    warn!(fields = ?fields, "Request validation failed");

    HttpResponse::BadRequest().json(ErrorResponse::bad_request())
}

/// Domain error carried through actix's error type
///
/// Used where a handler or extractor has to return `actix_web::Error`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        classify(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

/// JSON extractor configuration
///
/// Any body that fails to deserialize is answered with 400 `invalid request`.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req: &HttpRequest| {
            warn!(error = %err, "Rejected malformed request body");
            InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorResponse::bad_request()),
            )
            .into()
        })
}
