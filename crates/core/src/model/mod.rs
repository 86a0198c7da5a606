pub mod catalog;
mod item;
mod session;

pub use catalog::{Catalog, CatalogError};
pub use item::{StudyItem, StudyItemError};
pub use session::{
    Milestone, NavigationOutcome, ProgressSnapshot, RevealOutcome, SCORE_PER_REVEAL,
    STREAK_MILESTONE_INTERVAL, SessionSummary, StudyEvent, StudySession,
};
