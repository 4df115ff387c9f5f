//! contact-gate server
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                  CONTACT GATE                    │
//!                       │                                                  │
//!   POST /api/contact   │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!   ────────────────────┼─▶│  http   │──▶│  source  │──▶│ rate ledger  │   │
//!                       │  │ server  │   │   key    │   │ (per source) │   │
//!                       │  └─────────┘   └──────────┘   └──────┬───────┘   │
//!                       │                                      │           │
//!                       │                                      ▼           │
//!                       │                 ┌──────────┐   ┌──────────────┐  │
//!   200 / 400 / 429     │                 │ validate │◀──│   sanitize   │  │
//!   ◀───────────────────┼─────────────────│          │   │              │  │
//!                       │                 └────┬─────┘   └──────────────┘  │
//!                       │                      │ accepted                  │
//!                       │                      ▼                           │
//!                       │                ┌───────────┐                     │
//!                       │                │  notify   │──────────────────── ┼──▶ log / webhook
//!                       │                └───────────┘                     │
//!                       └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use contact_gate::http::HttpServer;
use contact_gate::lifecycle::{signals, startup, Shutdown};
use contact_gate::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "contact-gate")]
#[command(about = "Contact form endpoint with validation and per-source rate limiting")]
struct Args {
    /// Path to a TOML config file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:3000).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::resolve_config(args.config.as_deref(), args.bind.as_deref())?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("contact-gate v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_attempts = config.rate_limit.max_attempts,
        window_ms = config.rate_limit.window_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::forward_signals(&signal_shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
