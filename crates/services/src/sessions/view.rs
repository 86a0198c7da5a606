use glossary_core::model::{ProgressSnapshot, StudyEvent, StudySession};

/// The card currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub term: String,
    pub definition: String,
    pub example: String,
    pub category: String,
    pub face_up: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl CardView {
    pub(crate) fn from_session(session: &StudySession, face_up: bool) -> Option<Self> {
        let item = session.current_item()?;
        let position = session.position();
        Some(Self {
            term: item.term().to_owned(),
            definition: item.definition().to_owned(),
            example: item.example().to_owned(),
            category: item.category().to_owned(),
            face_up,
            can_go_back: position > 0,
            can_go_forward: position + 1 < session.len(),
        })
    }
}

/// What the presentation layer renders after each study-mode action.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyUpdate {
    pub snapshot: ProgressSnapshot,
    pub card: Option<CardView>,
    pub events: Vec<StudyEvent>,
}

impl StudyUpdate {
    #[must_use]
    pub fn streak_milestones(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                StudyEvent::StreakMilestone(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn completion_milestones(&self) -> Vec<glossary_core::model::Milestone> {
        self.events
            .iter()
            .filter_map(|e| match e {
                StudyEvent::CompletionMilestone(m) => Some(*m),
                _ => None,
            })
            .collect()
    }
}
