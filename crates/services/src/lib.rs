#![forbid(unsafe_code)]

pub mod app_services;
pub mod contact;
pub mod error;
pub mod sessions;

pub use glossary_core::Clock;

pub use app_services::AppServices;
pub use contact::{
    ContactField, ContactForm, ContactService, EmailDispatcher, EmailJsConfig, EmailJsDispatcher,
    SubmitReceipt,
};
pub use error::{ContactError, DeliveryError, StudyError, ValidationError};
pub use sessions::{CardView, StudyModeService, StudyUpdate};
