//! Employee Gateway
//!
//! A REST service exposing CRUD-style employee endpoints and forwarding
//! each to one upstream HTTP API, with retry-on-rate-limit behavior on
//! every upstream call.
//!
//! # Architecture Overview
//!
//! ```text
//! Client ──▶ http (axum router, request ID, timeout)
//!               │
//!               ▼
//!            employees (domain service, derived reads)
//!               │
//!               ▼
//!            upstream (retry executor → classify → envelope unwrap)
//!               │
//!               ▼
//!            Upstream Employee API
//!
//! Cross-cutting: config, lifecycle (shutdown), observability
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use employee_gateway::config::{self, ConfigError, GatewayConfig};
use employee_gateway::http::HttpServer;
use employee_gateway::lifecycle::Shutdown;

#[derive(Parser)]
#[command(name = "employee-gateway")]
#[command(about = "REST gateway over the upstream employee API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the upstream employee API base URL.
    #[arg(long, env = "EMPLOYEE_API_BASE_URL")]
    base_url: Option<String>,

    /// Override the maximum number of upstream call attempts.
    #[arg(long, env = "EMPLOYEE_API_MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Override the delay between upstream attempts, in milliseconds.
    #[arg(long, env = "EMPLOYEE_API_RETRY_DELAY_MS")]
    retry_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.upstream.base_url = base_url;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.upstream.max_attempts = max_attempts;
    }
    if let Some(retry_delay_ms) = cli.retry_delay_ms {
        config.upstream.retry_delay_ms = retry_delay_ms;
    }
    // Overrides can invalidate a config that loaded cleanly.
    config::validation::validate_config(&config).map_err(ConfigError::Validation)?;

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "employee_gateway={},tower_http=info",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_base_url = %config.upstream.base_url,
        max_attempts = config.upstream.max_attempts,
        retry_delay_ms = config.upstream.retry_delay_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => employee_gateway::observability::metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    // Coordinated shutdown: ctrl-c stops the server and interrupts any
    // pending retry delays.
    let shutdown = Arc::new(Shutdown::new());
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
        }
        signal_shutdown.trigger();
    });

    // Create and run HTTP server
    let server = HttpServer::new(&config, &shutdown)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
