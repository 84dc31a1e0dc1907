//! HTTP server setup and the request-handling boundary.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all relay handler
//! - Wire up middleware (timeout, tracing, request ID)
//! - Answer OPTIONS preflights without touching the network
//! - Convert every relay error into an HTTP response
//! - Observability (metrics, request IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use url::form_urlencoded;

use crate::config::RelayConfig;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::http::response;
use crate::observability::metrics;
use crate::relay::{target, Forwarder, RelayError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub config: Arc<RelayConfig>,
}

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl RelayServer {
    /// Create a new server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let config = Arc::new(config);
        let forwarder = Arc::new(Forwarder::new(&config)?);

        let state = AppState {
            forwarder,
            config: config.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener, until
    /// Ctrl+C or the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = shutdown.recv() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Main relay handler.
/// Resolves the target from the path, then forwards with redirect chasing.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    if request.method() == Method::OPTIONS {
        metrics::record_request("OPTIONS", 204, start_time);
        return response::preflight();
    }

    let method_str = request.method().to_string();
    let path = request.uri().path();
    let target_segment = path.strip_prefix('/').unwrap_or(path).to_string();
    let original_query: Vec<(String, String)> = request
        .uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    tracing::debug!(
        request_id = %request_id,
        method = %method_str,
        target = %target_segment,
        "Relaying request"
    );

    if target_segment.is_empty() {
        metrics::record_request(&method_str, 400, start_time);
        return RelayError::MissingTarget.into_response();
    }

    let target_url = match target::resolve(&target_segment, &original_query) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Target resolution failed");
            metrics::record_request(&method_str, e.status().as_u16(), start_time);
            return e.into_response();
        }
    };

    // Buffer the body once so it can be replayed on every redirect hop.
    let (parts, body) = request.into_parts();
    let max_body_bytes = state.config.forwarding.max_body_bytes;
    let body = match axum::body::to_bytes(body, max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(_) => {
            metrics::record_request(&method_str, 413, start_time);
            return RelayError::BodyTooLarge(max_body_bytes).into_response();
        }
    };

    match state
        .forwarder
        .forward(parts.method, &parts.headers, body, target_url)
        .await
    {
        Ok(upstream_response) => {
            metrics::record_request(&method_str, upstream_response.status().as_u16(), start_time);
            upstream_response
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Relay failed");
            metrics::record_request(&method_str, e.status().as_u16(), start_time);
            e.into_response()
        }
    }
}
