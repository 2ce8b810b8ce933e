use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use shared_utils::validation::{FieldError, ValidationFailure};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern")
    })
}

/// Sign-in form input.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Run every check and report all failures at once, in field order,
    /// so the form can highlight each field from the flattened map.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut errors = Vec::new();

        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "E-mail is required"));
        } else if !email_pattern().is_match(self.email.trim()) {
            errors.push(FieldError::new("email", "Enter a valid e-mail"));
        }

        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::new(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_credentials() {
        let credentials = Credentials::new("user@example.com", "123456");
        assert!(credentials.validate().is_ok());
    }

    #[test]
    fn empty_form_reports_both_fields() {
        let failure = Credentials::new("", "").validate().unwrap_err();

        let messages = failure.field_messages();
        assert_eq!(messages["email"], "E-mail is required");
        assert_eq!(messages["password"], "Password is required");
    }

    #[test]
    fn malformed_email_is_rejected() {
        let failure = Credentials::new("not-an-email", "123456")
            .validate()
            .unwrap_err();

        let messages = failure.field_messages();
        assert_eq!(messages["email"], "Enter a valid e-mail");
        assert!(!messages.contains_key("password"));
    }
}
