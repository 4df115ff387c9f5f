//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the contact and health handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Own the submission gate, its ledger, and the notification sink
//! - Run the ledger sweeper alongside the server

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    BoxError, Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GateConfig;
use crate::gate::{SubmissionGate, SystemClock};
use crate::http::contact::{contact_handler, method_not_allowed};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::response;
use crate::notify::{self, SinkError, SubmissionSink};
use crate::security::{LedgerSweeper, MemoryLedger, RatePolicy};

pub const CONTACT_PATH: &str = "/api/contact";
pub const HEALTH_PATH: &str = "/health";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<SubmissionGate>,
    pub sink: Arc<dyn SubmissionSink>,
}

/// HTTP server for the contact endpoint.
pub struct HttpServer {
    router: Router,
    config: GateConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a server with an in-memory ledger, the wall clock, and the
    /// sink selected by the configuration.
    pub fn new(config: GateConfig) -> Result<Self, SinkError> {
        let gate = Arc::new(SubmissionGate::new(
            Arc::new(MemoryLedger::new()),
            Arc::new(SystemClock),
            RatePolicy::from(&config.rate_limit),
        ));
        let sink = notify::from_config(&config.notifications)?;
        Ok(Self::with_parts(config, gate, sink))
    }

    /// Create a server around an existing gate and sink.
    pub fn with_parts(
        config: GateConfig,
        gate: Arc<SubmissionGate>,
        sink: Arc<dyn SubmissionSink>,
    ) -> Self {
        let state = AppState { gate, sink };
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Oversized bodies surface as a `JsonRejection` in the handler and
    /// timeouts go through `handle_middleware_error`, so both answer with
    /// the generic JSON 500.
    fn build_router(config: &GateConfig, state: AppState) -> Router {
        Router::new()
            .route(
                CONTACT_PATH,
                post(contact_handler).fallback(method_not_allowed),
            )
            .route(HEALTH_PATH, get(health_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
                    .layer(HandleErrorLayer::new(handle_middleware_error))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_attempts = self.config.rate_limit.max_attempts,
            window_ms = self.config.rate_limit.window_ms,
            "HTTP server starting"
        );

        let sweeper = LedgerSweeper::new(
            self.state.gate.ledger().clone(),
            self.state.gate.clock().clone(),
            self.state.gate.policy(),
            Duration::from_secs(self.config.rate_limit.sweep_interval_secs),
        );
        tokio::spawn(sweeper.run(shutdown.resubscribe()));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn gate(&self) -> Arc<SubmissionGate> {
        self.state.gate.clone()
    }
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
    }
    response::internal_error()
}

async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
