//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use contact_gate::config::GateConfig;
use contact_gate::gate::{ManualClock, SanitizedSubmission, SubmissionGate};
use contact_gate::http::HttpServer;
use contact_gate::lifecycle::Shutdown;
use contact_gate::notify::{SinkError, SubmissionSink};
use contact_gate::security::{MemoryLedger, RatePolicy};

pub const T0: u64 = 1_700_000_000_000;

/// Keeps every delivered submission in memory.
#[derive(Default)]
pub struct RecordingSink {
    pub delivered: Mutex<Vec<SanitizedSubmission>>,
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn deliver(&self, submission: &SanitizedSubmission) -> Result<(), SinkError> {
        self.delivered.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

/// Rejects every delivery.
pub struct FailingSink;

#[async_trait]
impl SubmissionSink for FailingSink {
    async fn deliver(&self, _submission: &SanitizedSubmission) -> Result<(), SinkError> {
        Err(SinkError::Status(503))
    }
}

/// Holds every delivery longer than any test timeout.
pub struct StalledSink;

#[async_trait]
impl SubmissionSink for StalledSink {
    async fn deliver(&self, _submission: &SanitizedSubmission) -> Result<(), SinkError> {
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        Ok(())
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub clock: Arc<ManualClock>,
    pub ledger: Arc<MemoryLedger>,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server on an ephemeral port with a manual clock and the given sink.
pub async fn start_server(sink: Arc<dyn SubmissionSink>) -> TestServer {
    start_server_with(GateConfig::default(), sink).await
}

pub async fn start_server_with(mut config: GateConfig, sink: Arc<dyn SubmissionSink>) -> TestServer {
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.observability.metrics_enabled = false;

    let clock = Arc::new(ManualClock::new(T0));
    let ledger = Arc::new(MemoryLedger::new());
    let gate = Arc::new(SubmissionGate::new(
        ledger.clone(),
        clock.clone(),
        RatePolicy::from(&config.rate_limit),
    ));

    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::with_parts(config, gate, sink);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        clock,
        ledger,
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
