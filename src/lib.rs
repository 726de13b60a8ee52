//! Employee Gateway Library
//!
//! A thin REST facade over an upstream employee data provider. Every
//! upstream call runs under a bounded-retry policy with differentiated
//! handling of transient and permanent failures.

pub mod config;
pub mod employees;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
