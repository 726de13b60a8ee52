//! Error responses for the public API.
//!
//! Maps the core's terminal failure kinds onto transport status codes
//! and a uniform JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::upstream::UpstreamError;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
}

/// Build an error response with the uniform body shape.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        timestamp: Utc::now().to_rfc3339(),
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Unknown").to_string(),
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let status = match &self {
            UpstreamError::NotFound(_) => StatusCode::NOT_FOUND,
            UpstreamError::OperationFailed(_) | UpstreamError::Rejected(_) => {
                StatusCode::BAD_GATEWAY
            }
            UpstreamError::Unavailable { .. } | UpstreamError::RetryInterrupted => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        match &self {
            UpstreamError::NotFound(_) => tracing::warn!(error = %self, "Employee not found"),
            _ => tracing::error!(error = %self, "Upstream operation failed"),
        }

        error_response(status, self.to_string())
    }
}
