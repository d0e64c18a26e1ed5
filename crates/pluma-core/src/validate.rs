//! Field-level validation rules.
//!
//! Stateless functions over input fields. Every rule is checked and every
//! violation collected before failing, so a single response reports the
//! complete error list.

use crate::error::{DomainError, ValidationIssue};

pub const MIN_PASSWORD_LEN: usize = 5;
pub const MIN_TITLE_LEN: usize = 5;
pub const MIN_CONTENT_LEN: usize = 5;

/// Validate registration input. Violations accumulate in field order:
/// email first, then password.
pub fn validate_registration(email: &str, password: &str) -> Result<(), DomainError> {
    let mut issues = Vec::new();

    if !is_valid_email(email) {
        issues.push(ValidationIssue::new("email address is not valid"));
    }
    if password.is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
        issues.push(ValidationIssue::new(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    finish(issues)
}

/// Validate post title and content. Violations accumulate in field order:
/// title first, then content.
pub fn validate_post_input(title: &str, content: &str) -> Result<(), DomainError> {
    let mut issues = Vec::new();

    if title.trim().is_empty() || title.chars().count() < MIN_TITLE_LEN {
        issues.push(ValidationIssue::new(format!(
            "title must be at least {MIN_TITLE_LEN} characters"
        )));
    }
    if content.trim().is_empty() || content.chars().count() < MIN_CONTENT_LEN {
        issues.push(ValidationIssue::new(format!(
            "content must be at least {MIN_CONTENT_LEN} characters"
        )));
    }

    finish(issues)
}

fn finish(issues: Vec<ValidationIssue>) -> Result<(), DomainError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(issues))
    }
}

/// Syntactic email check: one `@`, a non-empty local part, and a dotted
/// domain without whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_input() {
        assert!(validate_registration("reader@example.com", "secret-password").is_ok());
        assert!(validate_post_input("First post", "Hello, world!").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "no-at-sign", "@example.com", "user@", "user@nodot", "a b@example.com"] {
            assert!(!is_valid_email(email), "accepted {email:?}");
        }
        assert!(is_valid_email("user@example.co.uk"));
    }

    #[test]
    fn short_password_mentions_the_password() {
        let err = validate_registration("reader@example.com", "abc").unwrap_err();
        let DomainError::Validation(issues) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("password"));
    }

    #[test]
    fn violations_accumulate_in_field_order() {
        let err = validate_registration("not-an-email", "abc").unwrap_err();
        let DomainError::Validation(issues) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("email"));
        assert!(issues[1].message.contains("password"));

        let err = validate_post_input("", "hi").unwrap_err();
        let DomainError::Validation(issues) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("title"));
        assert!(issues[1].message.contains("content"));
    }

    #[test]
    fn boundary_lengths_pass() {
        assert!(validate_post_input("five!", "12345").is_ok());
        assert!(validate_registration("a@b.c", "12345").is_ok());
    }
}
