use async_trait::async_trait;

use crate::gate::SanitizedSubmission;
use crate::notify::{SinkError, SubmissionSink};

/// Records each accepted submission as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn deliver(&self, submission: &SanitizedSubmission) -> Result<(), SinkError> {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            phone = %submission.phone,
            company = %submission.company,
            subject = %submission.subject,
            interest = %submission.interest,
            message_chars = submission.message.chars().count(),
            "New contact submission"
        );
        Ok(())
    }
}
