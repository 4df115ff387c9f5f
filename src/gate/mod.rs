//! Contact submission gate.
//!
//! # Data Flow
//! ```text
//! (source key, SubmissionRecord)
//!     → RateLedger (admit or reject, per source)
//!     → submission.rs / sanitize.rs (escape + trim every field)
//!     → validate.rs (all field rules, in order)
//!     → Outcome
//! ```
//!
//! # Design Decisions
//! - Rate limit runs first: an over-quota caller learns nothing about its fields
//! - Expected rejections are values, never errors
//! - No I/O; delivery of accepted submissions belongs to `notify`

pub mod clock;
pub mod sanitize;
pub mod submission;
pub mod validate;

use std::sync::Arc;

use crate::security::rate_limit::{Admission, RateLedger, RatePolicy};

pub use clock::{Clock, ManualClock, SystemClock};
pub use submission::{SanitizedSubmission, SubmissionRecord};
pub use validate::{FieldError, ValidationResult};

/// Decision for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The source used up its quota. Fields were not looked at.
    RateLimited,
    /// One or more field rules failed, in rule order.
    Invalid(Vec<FieldError>),
    /// Ready to be delivered.
    Accepted(SanitizedSubmission),
}

impl Outcome {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::RateLimited => "rate_limited",
            Outcome::Invalid(_) => "invalid",
            Outcome::Accepted(_) => "accepted",
        }
    }
}

pub struct SubmissionGate {
    ledger: Arc<dyn RateLedger>,
    clock: Arc<dyn Clock>,
    policy: RatePolicy,
}

impl SubmissionGate {
    pub fn new(ledger: Arc<dyn RateLedger>, clock: Arc<dyn Clock>, policy: RatePolicy) -> Self {
        Self {
            ledger,
            clock,
            policy,
        }
    }

    pub fn handle(&self, source_key: &str, record: &SubmissionRecord) -> Outcome {
        let now = self.clock.now_ms();

        match self.ledger.try_admit(source_key, now, &self.policy) {
            Admission::Limited { recent } => {
                tracing::warn!(source = %source_key, recent, "Contact rate limit exceeded");
                return Outcome::RateLimited;
            }
            Admission::Admitted { recent } => {
                tracing::debug!(source = %source_key, recent, "Contact attempt admitted");
            }
        }

        let submission = record.sanitize();
        let result = validate::validate(&submission);
        if result.is_valid {
            Outcome::Accepted(submission)
        } else {
            tracing::info!(
                source = %source_key,
                errors = ?result.messages(),
                "Contact submission rejected"
            );
            Outcome::Invalid(result.errors)
        }
    }

    pub fn ledger(&self) -> &Arc<dyn RateLedger> {
        &self.ledger
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn policy(&self) -> RatePolicy {
        self.policy
    }
}
