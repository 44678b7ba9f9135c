use std::sync::Arc;

use tracing::{error, info, warn};

use super::domain::{
    ApplicantStageOne, ApplicantStageTwo, EligibilityDecision, StageOneSubmission,
    StageTwoSubmission,
};
use super::engine::{EligibilityEngine, FinalAssessment, PredictionError};
use super::repository::SessionStoreError;
use super::session::{WizardSession, WizardState};
use super::validation::ValidationError;

/// Drives a session through the initial screen and the final confirmation.
///
/// Sessions are taken by reference and returned by value; the controller keeps no
/// per-session state of its own.
#[derive(Clone)]
pub struct EligibilityWizard {
    engine: Arc<EligibilityEngine>,
}

impl EligibilityWizard {
    pub fn new(engine: Arc<EligibilityEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// "Check Initial Eligibility": decide stage one and record it on the session.
    pub fn check_initial(
        &self,
        session: &WizardSession,
        submission: &StageOneSubmission,
    ) -> Result<WizardSession, WizardError> {
        let applicant = ApplicantStageOne::try_from(submission).map_err(|err| {
            warn!(session = %session.id.0, error = %err, "initial submission rejected");
            err
        })?;

        let decision = self.engine.initial_decision(&applicant).map_err(|err| {
            error!(session = %session.id.0, error = %err, "initial prediction failed");
            err
        })?;

        info!(session = %session.id.0, %decision, "initial eligibility recorded");
        Ok(session.with_initial_result(decision))
    }

    /// "Confirm Final Eligibility": only reachable after an eligible initial result.
    pub fn confirm_final(
        &self,
        session: &WizardSession,
        submission: &StageTwoSubmission,
    ) -> Result<FinalAssessment, WizardError> {
        if !session.stage_two_unlocked() {
            return Err(WizardError::StageTwoLocked {
                state: session.state(),
            });
        }

        let applicant = ApplicantStageTwo::try_from(submission).map_err(|err| {
            warn!(session = %session.id.0, error = %err, "final submission rejected");
            err
        })?;

        let assessment = self.engine.final_decision(&applicant).map_err(|err| {
            error!(session = %session.id.0, error = %err, "Prediction error");
            err
        })?;

        info!(
            session = %session.id.0,
            decision = %assessment.decision,
            "final eligibility confirmed"
        );
        Ok(assessment)
    }
}

/// Error raised while driving the wizard.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error("final confirmation requires an eligible initial result (currently: {})", .state.label())]
    StageTwoLocked { state: WizardState },
    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

impl WizardError {
    pub fn initial_result(&self) -> Option<EligibilityDecision> {
        match self {
            WizardError::StageTwoLocked {
                state: WizardState::StageOneDecided(decision),
            } => Some(*decision),
            _ => None,
        }
    }
}
