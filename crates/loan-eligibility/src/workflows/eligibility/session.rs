use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::EligibilityDecision;

/// Identifier wrapper for wizard sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Where a session sits in the two-stage flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "decision", rename_all = "snake_case")]
pub enum WizardState {
    AwaitingStageOne,
    StageOneDecided(EligibilityDecision),
}

impl WizardState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AwaitingStageOne => "Awaiting Initial Eligibility",
            Self::StageOneDecided(EligibilityDecision::Eligible) => "Final Confirmation Unlocked",
            Self::StageOneDecided(EligibilityDecision::NotEligible) => "Initially Not Eligible",
        }
    }
}

/// Ephemeral state for one applicant's pass through the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSession {
    pub id: SessionId,
    pub initial_eligibility_result: Option<EligibilityDecision>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WizardSession {
    pub fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            initial_eligibility_result: None,
            started_at: now,
            updated_at: now,
        }
    }

    pub fn state(&self) -> WizardState {
        match self.initial_eligibility_result {
            None => WizardState::AwaitingStageOne,
            Some(decision) => WizardState::StageOneDecided(decision),
        }
    }

    /// The final form is shown only after an "Eligible" initial result.
    pub fn stage_two_unlocked(&self) -> bool {
        self.initial_eligibility_result == Some(EligibilityDecision::Eligible)
    }

    /// Copy of this session with a fresh initial decision, replacing any earlier one.
    pub fn with_initial_result(&self, decision: EligibilityDecision) -> Self {
        Self {
            initial_eligibility_result: Some(decision),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn view(&self) -> SessionView {
        let state = self.state();
        SessionView {
            session_id: self.id.clone(),
            state,
            status: state.label(),
            initial_eligibility_result: self.initial_eligibility_result,
            stage_two_unlocked: self.stage_two_unlocked(),
            started_at: self.started_at,
            updated_at: self.updated_at,
        }
    }
}

/// Serialized session summary returned to the form.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub state: WizardState,
    pub status: &'static str,
    pub initial_eligibility_result: Option<EligibilityDecision>,
    pub stage_two_unlocked: bool,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
