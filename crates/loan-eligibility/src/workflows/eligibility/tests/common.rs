use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::eligibility::artifact::{ArtifactHandle, ArtifactLoadError, ModelArtifact};
use crate::workflows::eligibility::domain::{
    ApplicantStageTwo, EligibilityDecision, OccupationType, OrganizationType, StageOneSubmission,
    StageTwoSubmission,
};
use crate::workflows::eligibility::engine::{EligibilityEngine, EngineConfig};
use crate::workflows::eligibility::repository::{SessionStore, SessionStoreError};
use crate::workflows::eligibility::session::{SessionId, WizardSession};
use crate::workflows::eligibility::{eligibility_router, EligibilityService, EligibilityWizard};

pub(super) fn loaded_artifact() -> ArtifactHandle {
    ArtifactHandle::from(ModelArtifact {
        path: "ensemble_model_predictions.json".into(),
        payload: serde_json::json!({ "estimators": ["rf", "gbm"] }),
    })
}

pub(super) fn missing_artifact() -> ArtifactHandle {
    ArtifactHandle::from(ArtifactLoadError::Missing {
        path: "ensemble_model_predictions.json".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    })
}

pub(super) fn engine_with(artifact: ArtifactHandle) -> EligibilityEngine {
    EligibilityEngine::new(artifact, EngineConfig::default())
}

pub(super) fn wizard() -> EligibilityWizard {
    EligibilityWizard::new(Arc::new(engine_with(loaded_artifact())))
}

pub(super) fn fresh_session(suffix: &str) -> WizardSession {
    WizardSession::new(SessionId(format!("session-{suffix}")))
}

pub(super) fn decided_session(suffix: &str, decision: EligibilityDecision) -> WizardSession {
    WizardSession {
        initial_eligibility_result: Some(decision),
        updated_at: Utc::now(),
        ..fresh_session(suffix)
    }
}

pub(super) fn eligible_stage_one() -> StageOneSubmission {
    StageOneSubmission {
        income: Some(60_000.0),
        credit_score: Some(720.0),
    }
}

pub(super) fn ineligible_stage_one() -> StageOneSubmission {
    StageOneSubmission {
        income: Some(40_000.0),
        credit_score: Some(720.0),
    }
}

/// Matches the first disjunct: working age, mid-size loan, modest annuity.
pub(super) fn eligible_stage_two() -> StageTwoSubmission {
    StageTwoSubmission {
        age: Some(40.0),
        credit_amount: Some(20_000.0),
        organization_type: Some("Business Entity Type 3".to_string()),
        days_registration: Some(400.0),
        days_id_publish: Some(200.0),
        occupation_type: Some("Managers".to_string()),
        loan_annuity: Some(3_000.0),
    }
}

pub(super) fn applicant(
    age: u32,
    credit_amount: f64,
    organization_type: OrganizationType,
    loan_annuity: f64,
) -> ApplicantStageTwo {
    ApplicantStageTwo {
        age,
        credit_amount,
        organization_type,
        days_registration: 400,
        days_id_publish: 200,
        occupation_type: OccupationType::Laborers,
        loan_annuity,
    }
}

pub(super) fn build_service() -> (EligibilityService<MemorySessions>, Arc<MemorySessions>) {
    let sessions = Arc::new(MemorySessions::default());
    let service = EligibilityService::new(wizard(), sessions.clone());
    (service, sessions)
}

/// Service whose decision tables are poisoned, so every decision fails.
pub(super) fn poisoned_service() -> (EligibilityService<MemorySessions>, Arc<MemorySessions>) {
    let engine = Arc::new(engine_with(loaded_artifact()));
    engine.poison_caches();
    let sessions = Arc::new(MemorySessions::default());
    let service = EligibilityService::new(EligibilityWizard::new(engine), sessions.clone());
    (service, sessions)
}

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, WizardSession>>>,
}

impl MemorySessions {
    pub(super) fn stored(&self, id: &SessionId) -> Option<WizardSession> {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl SessionStore for MemorySessions {
    fn insert(&self, session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(SessionStoreError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: WizardSession) -> Result<(), SessionStoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.insert(session.id.clone(), session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<WizardSession, SessionStoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.remove(id).ok_or(SessionStoreError::NotFound)
    }
}

pub(super) struct UnavailableSessions;

impl SessionStore for UnavailableSessions {
    fn insert(&self, _session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _session: WizardSession) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<WizardSession, SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: EligibilityService<MemorySessions>) -> axum::Router {
    eligibility_router(Arc::new(service))
}
