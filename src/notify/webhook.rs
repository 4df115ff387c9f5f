//! Forwards accepted submissions to an HTTP endpoint.

use async_trait::async_trait;
use std::time::Duration;

use crate::gate::SanitizedSubmission;
use crate::notify::{SinkError, SubmissionSink};

pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: String, timeout: Duration) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl SubmissionSink for WebhookSink {
    async fn deliver(&self, submission: &SanitizedSubmission) -> Result<(), SinkError> {
        let response = self.client.post(&self.url).json(submission).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Status(status.as_u16()));
        }

        tracing::debug!(url = %self.url, status = %status, "Submission delivered to webhook");
        Ok(())
    }
}
