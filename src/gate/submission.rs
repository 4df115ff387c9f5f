//! Contact form payloads.

use serde::{Deserialize, Serialize};

use crate::gate::sanitize::sanitize;

/// A contact form as decoded from the wire. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub interest: Option<String>,
}

/// A contact form after HTML escaping and trimming.
///
/// This is the only shape handed to notification sinks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub subject: String,
    pub message: String,
    pub interest: String,
}

impl SubmissionRecord {
    /// Escape and trim every field; missing fields become empty strings.
    pub fn sanitize(&self) -> SanitizedSubmission {
        let field = |value: &Option<String>| sanitize(value.as_deref().unwrap_or_default());

        SanitizedSubmission {
            name: field(&self.name),
            email: field(&self.email),
            phone: field(&self.phone),
            company: field(&self.company),
            subject: field(&self.subject),
            message: field(&self.message),
            interest: field(&self.interest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_become_empty() {
        let record: SubmissionRecord =
            serde_json::from_str(r#"{"name":" Ana ","email":null}"#).unwrap();
        let clean = record.sanitize();

        assert_eq!(clean.name, "Ana");
        assert_eq!(clean.email, "");
        assert_eq!(clean.interest, "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let record: SubmissionRecord =
            serde_json::from_str(r#"{"subject":"Tour","newsletter":true}"#).unwrap();
        assert_eq!(record.subject.as_deref(), Some("Tour"));
    }

    #[test]
    fn test_non_string_field_is_rejected() {
        let result = serde_json::from_str::<SubmissionRecord>(r#"{"phone":5511999999999}"#);
        assert!(result.is_err());
    }
}
