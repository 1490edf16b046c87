//! Centralized error handling
//!
//! Handlers return `Result<HttpResponse, ApiError>` and bubble failures
//! up with `?`; the `ResponseError` impl turns each variant into the
//! documented `{error, message, status_code}` JSON body.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::services::StoreError;

/// Central application error type for the HTTP surface
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::EmailTaken(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidJson(_) | ApiError::InvalidQuery(_) | ApiError::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self);
        }

        let (error, message) = match self {
            ApiError::Validation(errors) => ("validation_failed", format_validation_errors(errors)),
            ApiError::Store(StoreError::NotFound(id)) => {
                ("not_found", format!("No profile with id {}", id))
            }
            ApiError::Store(StoreError::EmailTaken(email)) => {
                ("email_taken", format!("Email already registered: {}", email))
            }
            ApiError::Store(_) => ("internal_error", "Internal server error".to_string()),
            ApiError::InvalidJson(detail) => ("invalid_json", format!("Invalid JSON: {}", detail)),
            ApiError::InvalidQuery(detail) => {
                ("invalid_query", format!("Invalid query: {}", detail))
            }
            ApiError::InvalidPath(detail) => ("invalid_path", format!("Invalid path: {}", detail)),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error.to_string(),
            message,
            status_code: status.as_u16(),
        })
    }
}

/// Flatten field errors into a stable, human-readable summary.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidQuery(err.to_string()).into()
}

/// Handle path extraction errors
pub fn handle_path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Path error on {}: {}", req.path(), err);
    ApiError::InvalidPath(err.to_string()).into()
}
