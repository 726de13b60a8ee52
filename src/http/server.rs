//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Bind the server to a listener and serve until shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::employees::EmployeeService;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::lifecycle::{Shutdown, ShutdownListener};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmployeeService>,
}

/// HTTP server for the employee gateway.
pub struct HttpServer {
    router: Router,
    shutdown: ShutdownListener,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &GatewayConfig, shutdown: &Shutdown) -> Result<Self, reqwest::Error> {
        let service = Arc::new(EmployeeService::new(&config.upstream, shutdown.subscribe())?);
        let state = AppState { service };
        let router = Self::build_router(config, state);

        Ok(Self {
            router,
            shutdown: shutdown.subscribe(),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route(
                "/api/v1/employee",
                get(handlers::list_employees).post(handlers::create_employee),
            )
            .route("/api/v1/employee/search/{fragment}", get(handlers::search_employees))
            .route("/api/v1/employee/highestSalary", get(handlers::highest_salary))
            .route(
                "/api/v1/employee/topTenHighestEarningEmployeeNames",
                get(handlers::top_earner_names),
            )
            .route(
                "/api/v1/employee/{id}",
                get(handlers::get_employee).delete(handlers::delete_employee),
            )
            // route_layer so the matched route template is available for
            // low-cardinality metric labels.
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut shutdown = self.shutdown;
        let app = self.router.into_make_service();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.triggered().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record request count and latency for every handled request.
async fn track_metrics(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    // Use the route template, not the raw path, to keep label cardinality low.
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;
    metrics::record_request(method.as_str(), &path, response.status().as_u16(), started);
    response
}
