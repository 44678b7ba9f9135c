use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{StageOneSubmission, StageTwoSubmission};
use super::engine::FinalAssessment;
use super::repository::{SessionStore, SessionStoreError};
use super::session::{SessionId, WizardSession};
use super::wizard::{EligibilityWizard, WizardError};

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

/// Service composing the wizard controller with session storage.
pub struct EligibilityService<S> {
    wizard: EligibilityWizard,
    sessions: Arc<S>,
}

impl<S> EligibilityService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(wizard: EligibilityWizard, sessions: Arc<S>) -> Self {
        Self { wizard, sessions }
    }

    pub fn wizard(&self) -> &EligibilityWizard {
        &self.wizard
    }

    /// Open a fresh session awaiting the initial screen.
    pub fn start_session(&self) -> Result<WizardSession, WizardError> {
        let session = WizardSession::new(next_session_id());
        let stored = self.sessions.insert(session)?;
        Ok(stored)
    }

    pub fn session(&self, id: &SessionId) -> Result<WizardSession, WizardError> {
        let session = self
            .sessions
            .fetch(id)?
            .ok_or(SessionStoreError::NotFound)?;
        Ok(session)
    }

    /// Decide stage one and persist the result; a failure leaves the stored session as it was.
    pub fn check_initial(
        &self,
        id: &SessionId,
        submission: &StageOneSubmission,
    ) -> Result<WizardSession, WizardError> {
        let session = self.session(id)?;
        let updated = self.wizard.check_initial(&session, submission)?;
        self.sessions.update(updated.clone())?;
        Ok(updated)
    }

    pub fn confirm_final(
        &self,
        id: &SessionId,
        submission: &StageTwoSubmission,
    ) -> Result<FinalAssessment, WizardError> {
        let session = self.session(id)?;
        self.wizard.confirm_final(&session, submission)
    }

    pub fn end_session(&self, id: &SessionId) -> Result<WizardSession, WizardError> {
        let removed = self.sessions.remove(id)?;
        Ok(removed)
    }
}
