//! Wizard manager — drives sessions against the profile store.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, WizardError};
use crate::profile::model::{DraftProfile, Profile};
use crate::profile::validate::ValidationErrors;
use crate::store::ProfileStore;
use crate::wizard::session::WizardSession;
use crate::wizard::step::WizardStep;

/// Whether a submit created a new profile or updated an existing one.
///
/// Decided by the session's mode at submit time, not by what the store
/// found: an edit run reports `Updated` even if the original entry was
/// deleted underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Result of a successful submit.
#[derive(Debug, Clone)]
pub struct SavedProfile {
    /// The profile as persisted.
    pub profile: Profile,
    pub outcome: SaveOutcome,
}

/// Drives the wizard: step navigation, draft accumulation, and the final
/// save into the profile store.
///
/// One session at a time; starting a new create or edit run discards any
/// run already in progress.
pub struct WizardManager {
    store: Arc<ProfileStore>,
    session: RwLock<WizardSession>,
}

impl WizardManager {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        Self {
            store,
            session: RwLock::new(WizardSession::new()),
        }
    }

    /// Begin a create-mode run at the first step.
    pub async fn start_create(&self) {
        *self.session.write().await = WizardSession::new();
        debug!("Wizard started in create mode");
    }

    /// Begin an edit-mode run seeded from the stored profile with `id`.
    pub async fn start_edit(&self, id: &str) -> Result<(), Error> {
        let profile = self
            .store
            .get(id)
            .await
            .ok_or_else(|| WizardError::ProfileNotFound { id: id.to_string() })?;
        *self.session.write().await = WizardSession::for_edit(&profile);
        debug!(id = %profile.id, "Wizard started in edit mode");
        Ok(())
    }

    /// Merge `fields` into the draft and advance if the current step
    /// validates. Returns the step now showing.
    pub async fn next(&self, fields: DraftProfile) -> Result<WizardStep, ValidationErrors> {
        let mut session = self.session.write().await;
        match session.advance(fields) {
            Ok(step) => {
                debug!(step = %step, "Wizard advanced");
                Ok(step)
            }
            Err(errors) => {
                debug!(failed_fields = errors.len(), "Step blocked by validation");
                Err(errors)
            }
        }
    }

    /// Merge `fields` into the draft and go back one step. Back never
    /// validates, so half-finished input survives the navigation.
    pub async fn back(&self, fields: DraftProfile) -> WizardStep {
        self.session.write().await.back(fields)
    }

    /// Reopen the form from the summary. Draft and mode are kept.
    pub async fn edit_details(&self) -> WizardStep {
        self.back(DraftProfile::default()).await
    }

    /// Abandon the current run, dropping the draft.
    pub async fn cancel(&self) {
        self.session.write().await.reset();
        debug!("Wizard cancelled");
    }

    /// Persist the draft. Only valid at the summary step.
    ///
    /// Create mode assigns a fresh UUID; edit mode keeps the id being
    /// edited so the store replaces that entry in place. The session resets
    /// only after the store write succeeds; a failed save leaves everything
    /// intact for a retry.
    pub async fn submit(&self) -> Result<SavedProfile, Error> {
        let (profile, outcome) = {
            let session = self.session.read().await;
            if session.step() != WizardStep::Summary {
                return Err(WizardError::SubmitUnavailable {
                    step: session.step(),
                }
                .into());
            }

            let (id, outcome) = match session.editing_id() {
                Some(id) => (id.to_string(), SaveOutcome::Updated),
                None => (Uuid::new_v4().to_string(), SaveOutcome::Created),
            };
            let profile = session
                .draft()
                .clone()
                .into_profile(id)
                .map_err(WizardError::IncompleteDraft)?;
            (profile, outcome)
        };

        self.store.upsert(profile.clone()).await?;

        self.session.write().await.reset();
        info!(id = %profile.id, outcome = ?outcome, "Wizard submitted");
        Ok(SavedProfile { profile, outcome })
    }

    // ── Session views ───────────────────────────────────────────────

    pub async fn step(&self) -> WizardStep {
        self.session.read().await.step()
    }

    /// Snapshot of the draft as merged so far.
    pub async fn draft(&self) -> DraftProfile {
        self.session.read().await.draft().clone()
    }

    pub async fn editing_id(&self) -> Option<String> {
        self.session.read().await.editing_id().map(str::to_string)
    }

    pub async fn is_editing(&self) -> bool {
        self.session.read().await.is_editing()
    }
}
