//! Wizard session state.
//!
//! One pass through the wizard: the accumulating draft, the step the user
//! is on, and the id of the profile being edited (if any). Pure state
//! transitions live here; persistence is the manager's job.

use crate::profile::model::{DraftProfile, Profile};
use crate::profile::validate::{ValidationErrors, validate_address_info, validate_basic_info};
use crate::wizard::step::WizardStep;

/// Ephemeral state of a single wizard run. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    step: WizardStep,
    draft: DraftProfile,
    editing_id: Option<String>,
}

impl WizardSession {
    /// Fresh create-mode session at the first step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit-mode session seeded with the stored profile's fields.
    pub fn for_edit(profile: &Profile) -> Self {
        Self {
            step: WizardStep::default(),
            draft: profile.to_draft(),
            editing_id: Some(profile.id.clone()),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &DraftProfile {
        &self.draft
    }

    /// Id of the profile being edited, or `None` in create mode.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Merge `fields` into the draft and advance past the current step if
    /// it validates.
    ///
    /// On failure the merged fields are kept and the step does not move, so
    /// the caller can re-render the attempted values alongside the errors.
    /// Advancing from the summary is a no-op; submit is the way out.
    pub fn advance(&mut self, fields: DraftProfile) -> Result<WizardStep, ValidationErrors> {
        self.draft.merge(fields);

        let errors = match self.step {
            WizardStep::BasicInfo => validate_basic_info(&self.draft),
            WizardStep::Address => validate_address_info(&self.draft),
            WizardStep::Summary => ValidationErrors::default(),
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Merge `fields` into the draft unconditionally and go back one step.
    ///
    /// Back never validates; half-finished values survive the navigation.
    pub fn back(&mut self, fields: DraftProfile) -> WizardStep {
        self.draft.merge(fields);
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Drop the draft and edit target and return to the first step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
