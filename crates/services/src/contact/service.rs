use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::form::ContactForm;
use crate::Clock;
use crate::error::{ContactError, DeliveryError};

/// Shown to the visitor after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

/// Third-party email delivery.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn send(&self, form: &ContactForm) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub sent_at: DateTime<Utc>,
}

/// Validate-then-deliver flow for the contact form.
///
/// At most one delivery is in flight; `is_submitting` lets the caller disable
/// the submit control while it runs.
pub struct ContactService {
    clock: Clock,
    dispatcher: Arc<dyn EmailDispatcher>,
    submitting: AtomicBool,
}

impl ContactService {
    #[must_use]
    pub fn new(clock: Clock, dispatcher: Arc<dyn EmailDispatcher>) -> Self {
        Self {
            clock,
            dispatcher,
            submitting: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Validate `form` and hand it to the dispatcher.
    ///
    /// No retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Validation` before any delivery attempt,
    /// `ContactError::Busy` if another submission is in flight, and
    /// `ContactError::Delivery` if the dispatcher fails.
    pub async fn submit(&self, form: &ContactForm) -> Result<SubmitReceipt, ContactError> {
        form.validate()?;

        let _guard = SubmittingGuard::acquire(&self.submitting).ok_or(ContactError::Busy)?;

        match self.dispatcher.send(form).await {
            Ok(()) => {
                log::info!("contact message from {} delivered", form.email);
                Ok(SubmitReceipt {
                    sent_at: self.clock.now(),
                })
            }
            Err(err) => {
                log::warn!("contact message from {} failed: {err:?}", form.email);
                Err(ContactError::Delivery(err))
            }
        }
    }
}

/// Holds the submitting flag until dropped.
struct SubmittingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmittingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_is_exclusive_and_released_on_drop() {
        let flag = AtomicBool::new(false);
        let first = SubmittingGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(SubmittingGuard::acquire(&flag).is_none());
        drop(first);
        assert!(!flag.load(Ordering::Acquire));
        assert!(SubmittingGuard::acquire(&flag).is_some());
    }
}
