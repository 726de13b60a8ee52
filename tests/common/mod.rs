//! Shared utilities for integration testing against a scripted upstream.
//!
//! The upstream employee API is played by a wiremock server; the gateway
//! under test is either the domain service driven directly, or the full
//! HTTP server bound to an ephemeral port and driven with reqwest.

use std::sync::Arc;

use employee_gateway::config::GatewayConfig;
use employee_gateway::http::HttpServer;
use employee_gateway::lifecycle::Shutdown;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Wrap a payload in the upstream's response envelope.
pub fn envelope(data: Value) -> Value {
    json!({
        "data": data,
        "status": "Successfully processed request.",
    })
}

/// An employee in the upstream wire format (`employee_*` field names).
pub fn employee_json(id: &str, name: &str, salary: i64, age: i64, title: &str) -> Value {
    json!({
        "id": id,
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": age,
        "employee_title": title,
        "employee_email": format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
    })
}

/// A gateway config pointed at the given upstream, with fast retries so
/// exhaustion tests stay quick.
pub fn test_config(upstream_uri: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.base_url = format!("{upstream_uri}/api/v1/employee");
    config.upstream.max_attempts = 3;
    config.upstream.retry_delay_ms = 25;
    config.upstream.request_timeout_secs = 5;
    config
}

/// Boot the full HTTP server on an ephemeral port.
///
/// Callers must keep the returned `Shutdown` alive for the duration of
/// the test; dropping it stops the server.
#[allow(dead_code)]
pub async fn spawn_gateway(config: &GatewayConfig) -> (String, Arc<Shutdown>) {
    let shutdown = Arc::new(Shutdown::new());
    let server = HttpServer::new(config, &shutdown).expect("failed to build gateway");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    (format!("http://{addr}"), shutdown)
}
