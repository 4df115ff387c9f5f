//! Field rules for sanitized contact forms.
//!
//! Every rule runs on every call; failures are collected in field order
//! (name, email, phone, company, subject, message) so the sender can fix
//! everything in one round trip. Lengths are counted in Unicode scalar values
//! (`char`s) of the sanitized value, so escaped markup counts at its expanded
//! size and an emoji counts once.

use thiserror::Error;

use crate::gate::sanitize::is_blank;
use crate::gate::submission::SanitizedSubmission;

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 150;
pub const PHONE_MAX: usize = 20;
pub const COMPANY_MAX: usize = 100;
pub const SUBJECT_MIN: usize = 5;
pub const SUBJECT_MAX: usize = 150;
pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 1000;

/// A violated field rule. The display text is shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Nome deve ter pelo menos 3 caracteres")]
    NameTooShort,
    #[error("Nome deve ter no máximo 100 caracteres")]
    NameTooLong,
    #[error("E-mail inválido")]
    EmailInvalid,
    #[error("E-mail deve ter no máximo 150 caracteres")]
    EmailTooLong,
    #[error("Telefone deve ter no máximo 20 caracteres")]
    PhoneTooLong,
    #[error("Empresa deve ter no máximo 100 caracteres")]
    CompanyTooLong,
    #[error("Assunto deve ter pelo menos 5 caracteres")]
    SubjectTooShort,
    #[error("Assunto deve ter no máximo 150 caracteres")]
    SubjectTooLong,
    #[error("Mensagem deve ter pelo menos 10 caracteres")]
    MessageTooShort,
    #[error("Mensagem deve ter no máximo 1000 caracteres")]
    MessageTooLong,
}

/// Outcome of running every field rule over one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Visitor-facing messages, in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

pub fn validate(submission: &SanitizedSubmission) -> ValidationResult {
    let mut errors = Vec::new();

    let name = char_len(&submission.name);
    if name < NAME_MIN {
        errors.push(FieldError::NameTooShort);
    }
    if name > NAME_MAX {
        errors.push(FieldError::NameTooLong);
    }

    if !is_valid_email(&submission.email) {
        errors.push(FieldError::EmailInvalid);
    }
    if char_len(&submission.email) > EMAIL_MAX {
        errors.push(FieldError::EmailTooLong);
    }

    if char_len(&submission.phone) > PHONE_MAX {
        errors.push(FieldError::PhoneTooLong);
    }
    if char_len(&submission.company) > COMPANY_MAX {
        errors.push(FieldError::CompanyTooLong);
    }

    let subject = char_len(&submission.subject);
    if subject < SUBJECT_MIN {
        errors.push(FieldError::SubjectTooShort);
    }
    if subject > SUBJECT_MAX {
        errors.push(FieldError::SubjectTooLong);
    }

    let message = char_len(&submission.message);
    if message < MESSAGE_MIN {
        errors.push(FieldError::MessageTooShort);
    }
    if message > MESSAGE_MAX {
        errors.push(FieldError::MessageTooLong);
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Loose `local@domain.tld` shape check.
///
/// No whitespace, exactly one `@` with text on both sides, and somewhere in
/// the domain a dot with at least one character before it and at least two
/// after it. Full RFC 5322 rules are not applied.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_blank) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // The earliest usable dot leaves the longest tail.
    domain
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '.')
        .map(|(i, _)| domain[i + 1..].chars().count() >= 2)
        .unwrap_or(false)
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SanitizedSubmission {
        SanitizedSubmission {
            name: "João Silva".into(),
            email: "joao@exemplo.com".into(),
            phone: String::new(),
            company: String::new(),
            subject: "Orçamento coworking".into(),
            message: "Gostaria de saber os valores disponíveis.".into(),
            interest: String::new(),
        }
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let result = validate(&valid());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_all_rules_reported_in_order() {
        let submission = SanitizedSubmission {
            name: "A".into(),
            email: "not-an-email".into(),
            message: "hi".into(),
            ..valid()
        };

        let result = validate(&submission);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                FieldError::NameTooShort,
                FieldError::EmailInvalid,
                FieldError::MessageTooShort,
            ]
        );
        assert_eq!(
            result.messages(),
            vec![
                "Nome deve ter pelo menos 3 caracteres",
                "E-mail inválido",
                "Mensagem deve ter pelo menos 10 caracteres",
            ]
        );
    }

    #[test]
    fn test_everything_empty() {
        let result = validate(&SanitizedSubmission::default());
        assert_eq!(
            result.errors,
            vec![
                FieldError::NameTooShort,
                FieldError::EmailInvalid,
                FieldError::SubjectTooShort,
                FieldError::MessageTooShort,
            ]
        );
    }

    #[test]
    fn test_upper_bounds() {
        let submission = SanitizedSubmission {
            name: "n".repeat(NAME_MAX + 1),
            email: format!("{}@exemplo.com", "a".repeat(EMAIL_MAX)),
            phone: "1".repeat(PHONE_MAX + 1),
            company: "c".repeat(COMPANY_MAX + 1),
            subject: "s".repeat(SUBJECT_MAX + 1),
            message: "m".repeat(MESSAGE_MAX + 1),
            interest: "i".repeat(5000),
        };

        assert_eq!(
            validate(&submission).errors,
            vec![
                FieldError::NameTooLong,
                FieldError::EmailTooLong,
                FieldError::PhoneTooLong,
                FieldError::CompanyTooLong,
                FieldError::SubjectTooLong,
                FieldError::MessageTooLong,
            ]
        );
    }

    #[test]
    fn test_limits_are_inclusive() {
        let submission = SanitizedSubmission {
            name: "n".repeat(NAME_MAX),
            phone: "1".repeat(PHONE_MAX),
            company: "c".repeat(COMPANY_MAX),
            subject: "s".repeat(SUBJECT_MIN),
            message: "m".repeat(MESSAGE_MAX),
            ..valid()
        };
        assert!(validate(&submission).is_valid);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let submission = SanitizedSubmission {
            name: "Zoë".into(),
            ..valid()
        };
        assert!(validate(&submission).is_valid);
    }

    #[test]
    fn test_emoji_count_once_toward_limits() {
        let at_limit = SanitizedSubmission {
            name: "😀".repeat(NAME_MAX),
            ..valid()
        };
        assert_eq!(at_limit.name.len(), NAME_MAX * 4);
        assert!(validate(&at_limit).is_valid);

        let over = SanitizedSubmission {
            name: "😀".repeat(NAME_MAX + 1),
            ..valid()
        };
        assert_eq!(validate(&over).errors, vec![FieldError::NameTooLong]);

        let short = SanitizedSubmission {
            name: "😀😀".into(),
            ..valid()
        };
        assert_eq!(validate(&short).errors, vec![FieldError::NameTooShort]);
    }

    #[test]
    fn test_escaped_markup_counts_expanded() {
        // "<b><b><" is 7 characters raw but 22 once escaped.
        let submission = SanitizedSubmission {
            phone: crate::gate::sanitize::sanitize("<b><b><"),
            ..valid()
        };
        assert_eq!(submission.phone.chars().count(), 22);
        assert_eq!(validate(&submission).errors, vec![FieldError::PhoneTooLong]);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let submission = SanitizedSubmission {
            name: "Jo".into(),
            ..valid()
        };
        assert_eq!(validate(&submission), validate(&submission));
    }

    #[test]
    fn test_email_shapes() {
        for ok in ["a@b.com", "first.last@sub.domain.org", "x@y.co", "a@b.c.d", "a@b..co"] {
            assert!(is_valid_email(ok), "{ok} should pass");
        }
        for bad in [
            "",
            "invalid-email",
            "@b.com",
            "a@",
            "a@b",
            "a@.com",
            "a@b.c",
            "a@@b.com",
            "a@b@c.com",
            "a b@c.com",
            "a@b.com ",
            "a\u{feff}b@c.com",
        ] {
            assert!(!is_valid_email(bad), "{bad} should fail");
        }
    }
}
