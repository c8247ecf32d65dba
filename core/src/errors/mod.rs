//! Domain-specific error types and error handling.
//!
//! Display strings are what a client may see. Anything describing the cause
//! (store failures, signature errors) lives in an internal `detail` that is
//! only ever logged.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken { detail: String },

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("email already exists")]
    Conflict,

    #[error("internal server error")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_token(detail: impl Into<String>) -> Self {
        DomainError::InvalidToken {
            detail: detail.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Internal cause, for logs only
    pub fn detail(&self) -> Option<&str> {
        match self {
            DomainError::InvalidToken { detail } => Some(detail),
            DomainError::Internal { message } => Some(message),
            _ => None,
        }
    }

    /// Whether this error stems from infrastructure rather than the caller
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Internal { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
