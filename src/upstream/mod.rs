//! Upstream employee API subsystem.
//!
//! # Data Flow
//! ```text
//! Domain operation (e.g. "fetch all employees")
//!     → retry.rs (bounded attempts, fixed delay between them)
//!     → client.rs (one HTTP call per attempt, envelope unwrapping)
//!     → error.rs (classify the raw outcome: success / retryable / terminal)
//!     → domain value, or one terminal failure kind
//! ```
//!
//! # Design Decisions
//! - Classification is an explicit tagged error type, not a downcast
//!   hierarchy; the retry loop is a plain match over three variants
//! - 429 and 5xx are transient (rate limiting, backend trouble); other
//!   4xx will not change between attempts and fail immediately
//! - The delay is fixed, not exponential: the upstream rate limiter
//!   operates on a fixed window and a uniform pause matches it
//! - Shutdown interrupts a pending delay instead of sleeping through it

pub mod client;
pub mod envelope;
pub mod error;
pub mod retry;

pub use client::EmployeeApi;
pub use envelope::ApiEnvelope;
pub use error::{AttemptError, TransientError, UpstreamError};
pub use retry::{RetryExecutor, RetryPolicy};
