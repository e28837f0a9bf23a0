//! Error types for the profile wizard.

use crate::profile::validate::ValidationErrors;
use crate::wizard::step::WizardStep;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),
}

/// Persistence gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend failed: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Wizard flow errors.
///
/// Per-field validation failures are data, not errors; they travel as
/// [`ValidationErrors`] mappings and only surface here when a submit is
/// attempted on a draft that still has gaps.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("No stored profile with id {id}")]
    ProfileNotFound { id: String },

    #[error("Submit is only available from the summary step (current step: {step})")]
    SubmitUnavailable { step: WizardStep },

    #[error("Draft is not ready to submit: {0}")]
    IncompleteDraft(ValidationErrors),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
