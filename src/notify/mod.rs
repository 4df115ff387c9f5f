//! Delivery of accepted submissions.
//!
//! # Data Flow
//! ```text
//! Outcome::Accepted(SanitizedSubmission)
//!     → SubmissionSink::deliver
//!         → log.rs (structured log event)
//!         → webhook.rs (JSON POST to a configured URL)
//! ```
//!
//! # Design Decisions
//! - The gate never calls a sink; the HTTP handler does, after acceptance
//! - A delivery failure surfaces as a generic server error to the visitor

pub mod log;
pub mod webhook;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::NotificationConfig;
use crate::gate::SanitizedSubmission;

pub use log::LogSink;
pub use webhook::WebhookSink;

/// Errors that can occur while delivering a submission.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The request could not be built, sent or completed.
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The receiver answered with a non-success status.
    #[error("webhook responded with status {0}")]
    Status(u16),
}

#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(&self, submission: &SanitizedSubmission) -> Result<(), SinkError>;
}

/// Pick the sink described by the configuration.
pub fn from_config(config: &NotificationConfig) -> Result<Arc<dyn SubmissionSink>, SinkError> {
    match &config.webhook_url {
        Some(url) => {
            let timeout = Duration::from_secs(config.webhook_timeout_secs);
            tracing::info!(url = %url, ?timeout, "Delivering submissions to webhook");
            Ok(Arc::new(WebhookSink::new(url.clone(), timeout)?))
        }
        None => {
            tracing::info!("No webhook configured, submissions are logged only");
            Ok(Arc::new(LogSink))
        }
    }
}
