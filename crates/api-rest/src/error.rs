//! Error classification and JSON error bodies for the REST surface.
//!
//! The boundary alone turns collaborator failures into HTTP responses; the
//! core components propagate their errors unchanged. Classification:
//!
//! - upstream transport failure -> 503 Service Unavailable
//! - upstream non-success status -> relayed status, body text preserved
//! - field validation failure -> 400 with a field-to-message map
//! - anything else -> 500 with a generic message

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use fda_core::RecordError;
use openfda::FdaClientError;
use serde::Serialize;

/// JSON body returned with every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Failures surfaced by the REST boundary.
#[derive(Debug)]
pub enum ApiError {
    /// One or more request fields failed validation.
    Validation(BTreeMap<String, String>),
    /// The OpenFDA API could not be reached.
    UpstreamUnavailable(String),
    /// The OpenFDA API answered with a non-success status.
    UpstreamRejected { status: u16, body: String },
    /// Any other failure, reported generically.
    Internal(String),
}

impl From<FdaClientError> for ApiError {
    fn from(err: FdaClientError) -> Self {
        match err {
            FdaClientError::Rejected { status, body } => ApiError::UpstreamRejected {
                status: status.as_u16(),
                body,
            },
            unavailable @ FdaClientError::Unavailable(_) => {
                ApiError::UpstreamUnavailable(unavailable.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidInput(message) => {
                let mut errors = BTreeMap::new();
                errors.insert("request".to_owned(), message);
                ApiError::Validation(errors)
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message, errors) = match self {
            ApiError::Validation(errors) => {
                tracing::error!("Validation error: {:?}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    "Validation Error".to_owned(),
                    "Validation failed for one or more fields".to_owned(),
                    Some(errors),
                )
            }
            ApiError::UpstreamUnavailable(message) => {
                tracing::error!("Error connecting to the OpenFDA API: {}", message);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service Unavailable".to_owned(),
                    message,
                    None,
                )
            }
            ApiError::UpstreamRejected { status, body } => {
                tracing::error!("OpenFDA API error ({}): {}", status, body);
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    "OpenFDA API Error".to_owned(),
                    format!("OpenFDA API error: {body}"),
                    None,
                )
            }
            ApiError::Internal(message) => {
                tracing::error!("Unexpected error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_owned(),
                    format!("An unexpected error occurred: {message}"),
                    None,
                )
            }
        };

        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}
