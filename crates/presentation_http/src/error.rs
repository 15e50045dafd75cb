//! API error handling
//!
//! Maps catalog failures to HTTP status codes with a JSON body
//! `{error, code, details?}`. In production mode, internal errors return a
//! generic message without details.

use std::sync::atomic::{AtomicBool, Ordering};

use application::{ApplicationError, CatalogError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Temporary refusal (open circuit, exhausted pool, no recorder)
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { code: &'static str, message: String },

    #[error("Internal error: {message}")]
    Internal { code: &'static str, message: String },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            Self::ServiceUnavailable { code, message } => {
                (StatusCode::SERVICE_UNAVAILABLE, code, message, None)
            },
            Self::Internal { code, message } => {
                // Internal errors should never leak details in production
                let details = should_expose_details().then_some(message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "An internal error occurred".to_string(),
                    details,
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let code = err.kind();
        match err {
            CatalogError::NotFound(_) => Self::NotFound(err.to_string()),
            CatalogError::CircuitOpen(_) | CatalogError::PoolExhausted { .. } => {
                Self::ServiceUnavailable {
                    code,
                    message: err.to_string(),
                }
            },
            CatalogError::CacheUnavailable(_)
            | CatalogError::DownstreamFailure(_)
            | CatalogError::Unclassified(_) => Self::Internal {
                code,
                message: err.to_string(),
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => e.into(),
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable {
                code: "service_unavailable",
                message: msg,
            },
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal {
                    code: "internal_error",
                    message: msg,
                }
            },
        }
    }
}
