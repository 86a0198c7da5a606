use std::sync::Arc;

use glossary_core::model::Catalog;

use crate::Clock;
use crate::contact::{ContactService, EmailDispatcher, EmailJsDispatcher};
use crate::sessions::StudyModeService;

/// Assembles app-facing services around one catalog and one clock.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    catalog: Arc<Catalog>,
    contact: Arc<ContactService>,
}

impl AppServices {
    /// Build services with EmailJS credentials taken from the environment.
    #[must_use]
    pub fn from_env(clock: Clock, catalog: Catalog) -> Self {
        let dispatcher = EmailJsDispatcher::from_env();
        if !dispatcher.enabled() {
            log::warn!("EmailJS is not configured; contact submissions will fail");
        }
        Self::new(clock, catalog, Arc::new(dispatcher))
    }

    #[must_use]
    pub fn new(clock: Clock, catalog: Catalog, dispatcher: Arc<dyn EmailDispatcher>) -> Self {
        Self {
            clock,
            catalog: Arc::new(catalog),
            contact: Arc::new(ContactService::new(clock, dispatcher)),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// A fresh study-mode driver over the shared catalog.
    #[must_use]
    pub fn study_mode(&self) -> StudyModeService {
        StudyModeService::new(self.clock, Arc::clone(&self.catalog))
    }

    #[must_use]
    pub fn contact(&self) -> Arc<ContactService> {
        Arc::clone(&self.contact)
    }
}
