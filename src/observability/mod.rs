//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; the request ID flows through spans
//! - Metric updates are cheap atomic operations, recorded from one
//!   middleware rather than per handler
//! - The metrics endpoint is opt-in and binds its own address

pub mod metrics;
