mod view;
mod workflow;

// Public API of the study subsystem.
pub use crate::error::StudyError;
pub use view::{CardView, StudyUpdate};
pub use workflow::StudyModeService;
