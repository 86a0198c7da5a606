use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        };
        f.write_str(name)
    }
}

/// Fields submitted from the site's contact form.
///
/// Serializes as the template parameters of the email template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Check that every field is filled in and the email looks deliverable.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` for the first blank field and
    /// `ValidationError::InvalidEmail` for a malformed address.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Message, &self.message),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern should compile")
});

/// `local@domain.tld` shape check: exactly one `@`, no whitespace, and a dot
/// in the domain with text on both sides.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for ok in ["a@b.co", "first.last@example.com", "x+tag@sub.domain.org", "a@b..c"] {
            assert!(is_valid_email(ok), "{ok}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "not-an-email",
            "@example.com",
            "a@",
            "a@b",
            "a@.com",
            "a@b.",
            "a@@b.com",
            "a@b@c.com",
            "a b@c.com",
            "a@b.c om",
        ] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn blank_fields_are_missing_in_order() {
        let form = ContactForm::new("", "", "");
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField(ContactField::Name))
        );

        let form = ContactForm::new("Ada", "ada@example.com", "   ");
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField(ContactField::Message))
        );
    }

    #[test]
    fn bad_email_is_rejected() {
        let form = ContactForm::new("Ada", "not-an-email", "Hello");
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn template_params_shape() {
        let form = ContactForm::new("Ada", "ada@example.com", "Hi");
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Ada", "email": "ada@example.com", "message": "Hi"})
        );
    }
}
