use std::sync::Arc;

use super::common::*;
use crate::workflows::eligibility::domain::{EligibilityDecision, StageOneSubmission};
use crate::workflows::eligibility::repository::SessionStoreError;
use crate::workflows::eligibility::session::SessionId;
use crate::workflows::eligibility::{EligibilityService, WizardError};

#[test]
fn start_session_persists_an_empty_session() {
    let (service, sessions) = build_service();

    let session = service.start_session().expect("session starts");

    assert!(session.id.0.starts_with("session-"));
    let stored = sessions.stored(&session.id).expect("session stored");
    assert_eq!(stored.initial_eligibility_result, None);
}

#[test]
fn check_initial_persists_the_decision() {
    let (service, sessions) = build_service();
    let session = service.start_session().expect("session starts");

    let updated = service
        .check_initial(&session.id, &eligible_stage_one())
        .expect("initial check");

    assert!(updated.stage_two_unlocked());
    let stored = sessions.stored(&session.id).expect("session stored");
    assert_eq!(
        stored.initial_eligibility_result,
        Some(EligibilityDecision::Eligible)
    );

    let assessment = service
        .confirm_final(&session.id, &eligible_stage_two())
        .expect("final decision");
    assert_eq!(assessment.decision, EligibilityDecision::Eligible);
}

#[test]
fn validation_failure_leaves_stored_session_unchanged() {
    let (service, sessions) = build_service();
    let session = service.start_session().expect("session starts");
    service
        .check_initial(&session.id, &eligible_stage_one())
        .expect("initial check");
    let before = sessions.stored(&session.id).expect("stored");

    let err = service
        .check_initial(
            &session.id,
            &StageOneSubmission {
                income: None,
                credit_score: Some(720.0),
            },
        )
        .expect_err("missing income");

    assert!(matches!(err, WizardError::Validation(_)));
    assert_eq!(sessions.stored(&session.id), Some(before));
}

#[test]
fn unknown_sessions_are_not_found() {
    let (service, _) = build_service();
    let err = service
        .check_initial(&SessionId("session-missing".to_string()), &eligible_stage_one())
        .expect_err("unknown session");
    assert!(matches!(
        err,
        WizardError::Session(SessionStoreError::NotFound)
    ));
}

#[test]
fn end_session_removes_state() {
    let (service, sessions) = build_service();
    let session = service.start_session().expect("session starts");

    service.end_session(&session.id).expect("session ends");

    assert!(sessions.stored(&session.id).is_none());
    assert!(service.end_session(&session.id).is_err());
}

#[test]
fn store_outage_surfaces_as_session_error() {
    let service = EligibilityService::new(wizard(), Arc::new(UnavailableSessions));
    let err = service.start_session().expect_err("store offline");
    assert!(matches!(
        err,
        WizardError::Session(SessionStoreError::Unavailable(_))
    ));
}

#[test]
fn poisoned_decision_table_fails_without_touching_the_session() {
    let (service, sessions) = poisoned_service();
    let session = service.start_session().expect("session starts");
    let before = sessions.stored(&session.id).expect("stored");

    let err = service
        .check_initial(&session.id, &eligible_stage_one())
        .expect_err("initial decision unavailable");

    match err {
        WizardError::Prediction(err) => {
            assert!(err.to_string().starts_with("Error in eligibility prediction"))
        }
        other => panic!("expected prediction error, got {other:?}"),
    }
    assert_eq!(sessions.stored(&session.id), Some(before));
}

#[test]
fn poisoned_decision_table_blocks_final_confirmation() {
    let (service, sessions) = poisoned_service();
    let session = decided_session("poisoned-final", EligibilityDecision::Eligible);
    sessions
        .sessions
        .lock()
        .expect("session mutex poisoned")
        .insert(session.id.clone(), session.clone());

    let err = service
        .confirm_final(&session.id, &eligible_stage_two())
        .expect_err("final decision unavailable");

    assert!(matches!(err, WizardError::Prediction(_)));
    assert_eq!(sessions.stored(&session.id), Some(session));
}
