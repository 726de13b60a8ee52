//! Upstream error taxonomy and outcome classification.
//!
//! # Responsibilities
//! - Define the terminal failure kinds surfaced to the routing layer
//! - Classify the raw outcome of one upstream attempt into
//!   success / retryable / terminal

use reqwest::StatusCode;
use thiserror::Error;

/// Cause of a single transient failure, retained for the final error.
#[derive(Debug, Error)]
pub enum TransientError {
    /// Upstream answered with 429 or a 5xx status.
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// Connect failure, timeout, or malformed response body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Terminal failure of one logical upstream operation.
///
/// Every non-success outcome of the core is exactly one of these kinds;
/// the routing layer maps them to transport status codes.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The requested employee does not exist upstream.
    #[error("Employee not found with ID: {0}")]
    NotFound(String),

    /// Upstream acknowledged the call but signaled failure.
    #[error("{0}")]
    OperationFailed(String),

    /// Upstream rejected the request with a client error that will not
    /// change between attempts (4xx other than 429 and 404-on-fetch).
    #[error("Upstream rejected the request with status {0}")]
    Rejected(StatusCode),

    /// Retry budget exhausted on transient failures.
    #[error("Upstream unavailable after {attempts} attempts")]
    Unavailable {
        attempts: u32,
        #[source]
        source: TransientError,
    },

    /// The inter-attempt delay was interrupted by shutdown.
    #[error("Retry interrupted by shutdown")]
    RetryInterrupted,
}

/// Classified outcome of one upstream attempt.
///
/// Together with `Ok(value)` this forms the closed three-way set the
/// retry loop matches over.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Expected to potentially succeed if retried unchanged.
    #[error(transparent)]
    Retryable(TransientError),

    /// Will not change on retry; surfaces immediately.
    #[error(transparent)]
    Terminal(UpstreamError),
}

impl AttemptError {
    /// Classify a non-2xx upstream status.
    ///
    /// 429 and 5xx are transient; any other client error is terminal.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            AttemptError::Retryable(TransientError::Status(status))
        } else {
            AttemptError::Terminal(UpstreamError::Rejected(status))
        }
    }

    pub fn not_found(id: &str) -> Self {
        AttemptError::Terminal(UpstreamError::NotFound(id.to_string()))
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        AttemptError::Terminal(UpstreamError::OperationFailed(message.into()))
    }
}

impl From<reqwest::Error> for AttemptError {
    /// Transport-level failures carry no HTTP status and are retryable.
    fn from(err: reqwest::Error) -> Self {
        AttemptError::Retryable(TransientError::Transport(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_is_retryable() {
        assert!(matches!(
            AttemptError::from_status(StatusCode::TOO_MANY_REQUESTS),
            AttemptError::Retryable(TransientError::Status(s)) if s == StatusCode::TOO_MANY_REQUESTS
        ));
    }

    #[test]
    fn server_errors_are_retryable() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
        ] {
            assert!(matches!(
                AttemptError::from_status(status),
                AttemptError::Retryable(TransientError::Status(_))
            ));
        }
    }

    #[test]
    fn other_client_errors_are_terminal() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::CONFLICT,
        ] {
            assert!(matches!(
                AttemptError::from_status(status),
                AttemptError::Terminal(UpstreamError::Rejected(s)) if s == status
            ));
        }
    }

    #[test]
    fn unavailable_reports_attempt_count_and_cause() {
        let err = UpstreamError::Unavailable {
            attempts: 3,
            source: TransientError::Status(StatusCode::TOO_MANY_REQUESTS),
        };
        assert_eq!(err.to_string(), "Upstream unavailable after 3 attempts");
        assert!(std::error::Error::source(&err).is_some());
    }
}
