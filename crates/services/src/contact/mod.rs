mod emailjs;
mod form;
mod service;

pub use emailjs::{EmailJsConfig, EmailJsDispatcher};
pub use form::{ContactField, ContactForm, is_valid_email};
pub use service::{ContactService, EmailDispatcher, SUCCESS_MESSAGE, SubmitReceipt};
