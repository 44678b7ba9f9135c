//! Two-stage loan eligibility wizard: an initial income/credit screen that unlocks a
//! final confirmation form, both decided by fixed threshold rules.

pub mod artifact;
pub mod cache;
pub mod domain;
pub mod engine;
pub mod form;
pub mod repository;
pub mod router;
pub mod rules;
pub mod screening;
pub mod service;
pub mod session;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use artifact::{ArtifactHandle, ArtifactLoadError, ModelArtifact};
pub use domain::{
    ApplicantStageOne, ApplicantStageTwo, EligibilityDecision, OccupationType, OrganizationType,
    StageOneSubmission, StageTwoSubmission,
};
pub use engine::{EligibilityEngine, EngineConfig, FinalAssessment, PredictionError};
pub use form::EligibilityFormLayout;
pub use repository::{SessionStore, SessionStoreError};
pub use router::eligibility_router;
pub use rules::{decide_stage_one, decide_stage_two, StageTwoDisjunct};
pub use screening::{InitialScreeningImporter, ScreeningImportError, ScreeningSummary};
pub use service::EligibilityService;
pub use session::{SessionId, SessionView, WizardSession, WizardState};
pub use validation::{FieldIssue, SubmissionStage, ValidationError};
pub use wizard::{EligibilityWizard, WizardError};
