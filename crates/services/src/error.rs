//! Shared error types for the services crate.

use thiserror::Error;

use crate::contact::ContactField;

/// Errors emitted by `StudyModeService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyError {
    #[error("no glossary terms match the current filter")]
    EmptyCatalog,
    #[error("study mode is not active")]
    Inactive,
    #[error("study mode is already active")]
    AlreadyActive,
}

/// Contact form input rejected before any delivery attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(ContactField),
    #[error("email address is not valid")]
    InvalidEmail,
}

/// The email delivery collaborator failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeliveryError {
    #[error("email delivery is not configured")]
    NotConfigured,
    #[error("email delivery failed with status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `ContactService::submit`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a message is already being sent")]
    Busy,
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl ContactError {
    /// Message suitable for showing to the visitor. Delivery details stay in
    /// the logs.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ContactError::Validation(ValidationError::MissingField(_)) => {
                "Please fill in all fields."
            }
            ContactError::Validation(ValidationError::InvalidEmail) => {
                "Please enter a valid email address."
            }
            ContactError::Busy => "Your message is still being sent.",
            ContactError::Delivery(_) => {
                "There was a problem sending your message. Please try again later."
            }
        }
    }
}
