//! Bounded retry execution for upstream calls.
//!
//! # Responsibilities
//! - Execute a caller-supplied operation up to `max_attempts` times
//! - Retry only on transient failure, with a fixed delay between attempts
//! - Surface a single final result: the value, or one terminal failure
//!
//! # Design Decisions
//! - `max_attempts` bounds upstream calls, not sleeps; N retryable
//!   attempts produce N−1 delays
//! - The delay suspends only the owning task; concurrent requests are
//!   never serialized against each other
//! - A pending delay is cut short by shutdown and reported as its own
//!   failure kind, distinct from upstream trouble

use std::future::Future;
use std::time::Duration;

use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;
use crate::upstream::error::{AttemptError, UpstreamError};

/// Retry policy, read from configuration once and immutable thereafter.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of upstream calls per logical operation.
    pub max_attempts: u32,

    /// Fixed delay between retryable attempts.
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts,
            retry_delay,
        }
    }
}

/// Executes upstream operations under a [`RetryPolicy`].
#[derive(Clone)]
pub struct RetryExecutor {
    policy: RetryPolicy,
    shutdown: ShutdownListener,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy, shutdown: ShutdownListener) -> Self {
        Self { policy, shutdown }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds, fails terminally, or the retry
    /// budget is exhausted.
    ///
    /// The operation is invoked once per attempt; its classified outcome
    /// drives the loop. The last transient cause is wrapped into the
    /// final [`UpstreamError::Unavailable`] when the budget runs out.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, UpstreamError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AttemptError>>,
    {
        let mut attempts = 0u32;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Terminal(err)) => return Err(err),
                Err(AttemptError::Retryable(cause)) => {
                    attempts += 1;
                    if attempts >= self.policy.max_attempts {
                        tracing::error!(
                            operation,
                            attempts,
                            error = %cause,
                            "Retry budget exhausted for upstream call"
                        );
                        return Err(UpstreamError::Unavailable {
                            attempts,
                            source: cause,
                        });
                    }

                    tracing::warn!(
                        operation,
                        attempt = attempts,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = self.policy.retry_delay.as_millis() as u64,
                        error = %cause,
                        "Transient upstream failure, retrying"
                    );
                    metrics::record_upstream_retry(operation);
                    self.pause().await?;
                }
            }
        }
    }

    /// Suspend the current task for the configured delay, or bail out if
    /// shutdown fires first.
    async fn pause(&self) -> Result<(), UpstreamError> {
        let mut listener = self.shutdown.clone();
        if listener.is_triggered() {
            return Err(UpstreamError::RetryInterrupted);
        }
        tokio::select! {
            _ = tokio::time::sleep(self.policy.retry_delay) => Ok(()),
            _ = listener.triggered() => Err(UpstreamError::RetryInterrupted),
        }
    }
}
