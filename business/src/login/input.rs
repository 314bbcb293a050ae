//! Credential input and client-side validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

pub const MIN_PASSWORD_LEN: usize = 6;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SHORT_PASSWORD_MESSAGE: &str = "Password must be at least 6 characters.";
pub const CHECK_CREDENTIALS_MESSAGE: &str = "Please check email and password.";

/// Editable fields of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Per-field validation. An empty result means the form may be submitted.
    pub fn validate(&self) -> LoginErrors {
        let mut errors = LoginErrors::default();
        if !is_valid_email(&self.email) {
            errors.email = Some(INVALID_EMAIL_MESSAGE.to_owned());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.password = Some(SHORT_PASSWORD_MESSAGE.to_owned());
        }
        if !errors.is_empty() {
            errors.general = Some(CHECK_CREDENTIALS_MESSAGE.to_owned());
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
    }
}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// `local@domain.tld` with no whitespace anywhere, surrounding spaces included.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Inline messages for the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub general: Option<String>,
}

impl LoginErrors {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            general: Some(message.into()),
            ..Self::default()
        }
    }

    /// Maps a server `errors` map onto the form. Unknown fields are folded into `general`.
    pub fn from_fields(fields: &FieldErrors) -> Self {
        let mut errors = Self::default();
        let mut others = Vec::new();
        for (field, message) in fields {
            match field.as_str() {
                "email" => errors.email = Some(message.clone()),
                "password" => errors.password = Some(message.clone()),
                _ => others.push(message.as_str()),
            }
        }
        if !others.is_empty() {
            errors.general = Some(others.join(" "));
        }
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.general.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("admin@example.co.uk"));
        assert!(is_valid_email("a.b@c.d"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@x."));
        assert!(!is_valid_email("a@b@x.com"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[test]
    fn test_email_surrounding_whitespace_is_rejected() {
        assert!(!is_valid_email(" a@b.co"));
        assert!(!is_valid_email("a@b.co "));
        assert!(!is_valid_email("a@b.co\n"));

        let errors = LoginInput::new(" admin@example.com", "secret1").validate();
        assert_eq!(errors.email.as_deref(), Some(INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_validate_reports_each_field() {
        let errors = LoginInput::new("nope", "123").validate();
        assert_eq!(errors.email.as_deref(), Some(INVALID_EMAIL_MESSAGE));
        assert_eq!(errors.password.as_deref(), Some(SHORT_PASSWORD_MESSAGE));
        assert_eq!(errors.general.as_deref(), Some(CHECK_CREDENTIALS_MESSAGE));
    }

    #[test]
    fn test_validate_accepts_good_input() {
        let input = LoginInput::new("admin@example.com", "secret1");
        assert!(input.is_valid());
        assert!(input.validate().is_empty());
    }

    #[test]
    fn test_password_boundary() {
        assert!(!LoginInput::new("a@x.com", "12345").is_valid());
        assert!(LoginInput::new("a@x.com", "123456").is_valid());
    }

    #[test]
    fn test_from_fields_routes_known_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("email".to_owned(), "Email not found".to_owned());
        fields.insert("ip_address".to_owned(), "Blocked".to_owned());

        let errors = LoginErrors::from_fields(&fields);
        assert_eq!(errors.email.as_deref(), Some("Email not found"));
        assert_eq!(errors.password, None);
        assert_eq!(errors.general.as_deref(), Some("Blocked"));
    }
}
