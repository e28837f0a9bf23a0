//! The guided wizard: step machine, session state, and orchestration.

pub mod manager;
pub mod session;
pub mod step;

pub use manager::{SaveOutcome, SavedProfile, WizardManager};
pub use session::WizardSession;
pub use step::WizardStep;
