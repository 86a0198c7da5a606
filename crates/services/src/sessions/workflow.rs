use std::sync::Arc;

use glossary_core::model::{Catalog, SessionSummary, StudyEvent, StudyItem, StudySession};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::view::{CardView, StudyUpdate};
use crate::Clock;
use crate::error::StudyError;

struct ActiveSession {
    session: StudySession,
    face_up: bool,
}

/// Drives study mode: browse filtering while inactive, and one
/// `StudySession` while active.
///
/// Every mutating call returns a `StudyUpdate` carrying the fresh progress
/// snapshot and the events the caller should surface.
pub struct StudyModeService {
    clock: Clock,
    catalog: Arc<Catalog>,
    search: String,
    category: Option<String>,
    visible: Vec<StudyItem>,
    active: Option<ActiveSession>,
    rng: StdRng,
}

impl StudyModeService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>) -> Self {
        let visible = catalog.items().to_vec();
        Self {
            clock,
            catalog,
            search: String::new(),
            category: None,
            visible,
            active: None,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Use a deterministic shuffle order.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Items matching the current filter, in catalog order.
    #[must_use]
    pub fn visible(&self) -> &[StudyItem] {
        &self.visible
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Recompute the browse list. An active session keeps its own items;
    /// the new filter applies from the next start or reset.
    pub fn set_filter(&mut self, search: &str, category: Option<&str>) -> &[StudyItem] {
        self.search = search.to_owned();
        self.category = category.filter(|c| !c.is_empty()).map(str::to_owned);
        self.visible = self.catalog.filter(&self.search, self.category.as_deref());
        log::debug!(
            "filter {:?}/{:?} matched {} terms",
            self.search,
            self.category,
            self.visible.len()
        );
        &self.visible
    }

    /// Enter study mode over a shuffled copy of the visible items.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::AlreadyActive` if a session is running and
    /// `StudyError::EmptyCatalog` if the filter matches nothing.
    pub fn start(&mut self) -> Result<StudyUpdate, StudyError> {
        if self.active.is_some() {
            return Err(StudyError::AlreadyActive);
        }
        if self.visible.is_empty() {
            return Err(StudyError::EmptyCatalog);
        }

        let session = StudySession::shuffled(&self.visible, &mut self.rng, self.clock.now());
        let total = session.len();
        log::info!("study mode started with {total} terms");
        self.active = Some(ActiveSession {
            session,
            face_up: false,
        });

        self.update(vec![StudyEvent::Started { total }])
    }

    /// Turn the current card over. Turning it face up counts as a reveal.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Inactive` outside study mode.
    pub fn flip(&mut self) -> Result<StudyUpdate, StudyError> {
        let active = self.active_mut()?;
        if active.face_up {
            active.face_up = false;
            return self.update(Vec::new());
        }
        self.reveal()
    }

    /// Show the definition side of the current card.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Inactive` outside study mode.
    pub fn reveal(&mut self) -> Result<StudyUpdate, StudyError> {
        let active = self.active_mut()?;
        active.face_up = true;
        let outcome = active.session.reveal();

        let mut events = vec![StudyEvent::Revealed(outcome)];
        if let Some(streak) = outcome.streak_milestone() {
            events.push(StudyEvent::StreakMilestone(streak));
        }
        self.update(events)
    }

    /// # Errors
    ///
    /// Returns `StudyError::Inactive` outside study mode.
    pub fn next(&mut self) -> Result<StudyUpdate, StudyError> {
        let active = self.active_mut()?;
        let outcome = active.session.next();
        if outcome.moved() {
            active.face_up = false;
        }
        self.update(vec![StudyEvent::Navigated(outcome)])
    }

    /// # Errors
    ///
    /// Returns `StudyError::Inactive` outside study mode.
    pub fn previous(&mut self) -> Result<StudyUpdate, StudyError> {
        let active = self.active_mut()?;
        let outcome = active.session.previous();
        if outcome.moved() {
            active.face_up = false;
        }
        self.update(vec![StudyEvent::Navigated(outcome)])
    }

    /// Reshuffle the visible items and clear every counter.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Inactive` outside study mode and
    /// `StudyError::EmptyCatalog` if the current filter matches nothing; the
    /// running session is left untouched in that case.
    pub fn reset(&mut self) -> Result<StudyUpdate, StudyError> {
        if self.active.is_none() {
            return Err(StudyError::Inactive);
        }
        if self.visible.is_empty() {
            return Err(StudyError::EmptyCatalog);
        }
        if let Some(active) = self.active.as_mut() {
            active.session.reset(&self.visible, &mut self.rng);
            active.face_up = false;
        }
        log::info!("study session reset");
        self.update(vec![StudyEvent::SessionReset])
    }

    /// Leave study mode and drop the session.
    ///
    /// The summary is only reported when something was studied.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Inactive` outside study mode.
    pub fn exit(&mut self) -> Result<Option<SessionSummary>, StudyError> {
        let active = self.active.take().ok_or(StudyError::Inactive)?;
        let summary = active.session.summary(self.clock.now());
        log::info!(
            "study mode exited: {}/{} studied, score {}",
            summary.studied,
            summary.total,
            summary.score
        );
        Ok((summary.studied > 0).then_some(summary))
    }

    /// Current state without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Inactive` outside study mode.
    pub fn current(&self) -> Result<StudyUpdate, StudyError> {
        let active = self.active.as_ref().ok_or(StudyError::Inactive)?;
        Ok(StudyUpdate {
            snapshot: active.session.snapshot(),
            card: CardView::from_session(&active.session, active.face_up),
            events: Vec::new(),
        })
    }

    fn active_mut(&mut self) -> Result<&mut ActiveSession, StudyError> {
        self.active.as_mut().ok_or(StudyError::Inactive)
    }

    fn update(&mut self, mut events: Vec<StudyEvent>) -> Result<StudyUpdate, StudyError> {
        let active = self.active_mut()?;
        let (snapshot, milestone) = active.session.check_progress();
        if let Some(milestone) = milestone {
            log::debug!("completion milestone {}%", milestone.percent());
            events.push(StudyEvent::CompletionMilestone(milestone));
        }
        Ok(StudyUpdate {
            snapshot,
            card: CardView::from_session(&active.session, active.face_up),
            events,
        })
    }
}
