use std::sync::Arc;

use super::common::*;
use crate::workflows::eligibility::domain::{EligibilityDecision, StageTwoSubmission};
use crate::workflows::eligibility::session::WizardState;
use crate::workflows::eligibility::{EligibilityWizard, WizardError};

#[test]
fn new_session_awaits_stage_one() {
    let session = fresh_session("new");
    assert_eq!(session.state(), WizardState::AwaitingStageOne);
    assert!(!session.stage_two_unlocked());
}

#[test]
fn eligible_initial_result_unlocks_final_form() {
    let wizard = wizard();
    let session = fresh_session("unlock");

    let updated = wizard
        .check_initial(&session, &eligible_stage_one())
        .expect("initial check succeeds");

    assert_eq!(
        updated.state(),
        WizardState::StageOneDecided(EligibilityDecision::Eligible)
    );
    assert!(updated.stage_two_unlocked());
    assert_eq!(session.initial_eligibility_result, None);
}

#[test]
fn resubmitting_stage_one_overwrites_the_result() {
    let wizard = wizard();
    let session = fresh_session("overwrite");

    let eligible = wizard
        .check_initial(&session, &eligible_stage_one())
        .expect("first check");
    let rejected = wizard
        .check_initial(&eligible, &ineligible_stage_one())
        .expect("second check");

    assert_eq!(
        rejected.initial_eligibility_result,
        Some(EligibilityDecision::NotEligible)
    );
    assert!(!rejected.stage_two_unlocked());
}

#[test]
fn final_confirmation_is_locked_until_eligible() {
    let wizard = wizard();

    let awaiting = fresh_session("awaiting");
    match wizard.confirm_final(&awaiting, &eligible_stage_two()) {
        Err(WizardError::StageTwoLocked {
            state: WizardState::AwaitingStageOne,
        }) => {}
        other => panic!("expected locked final form, got {other:?}"),
    }

    let rejected = decided_session("rejected", EligibilityDecision::NotEligible);
    let err = wizard
        .confirm_final(&rejected, &eligible_stage_two())
        .expect_err("not eligible sessions are terminal");
    assert_eq!(err.initial_result(), Some(EligibilityDecision::NotEligible));
}

#[test]
fn final_confirmation_decides_for_unlocked_sessions() {
    let wizard = wizard();
    let session = decided_session("final", EligibilityDecision::Eligible);

    let assessment = wizard
        .confirm_final(&session, &eligible_stage_two())
        .expect("final decision");

    assert_eq!(assessment.decision, EligibilityDecision::Eligible);
    assert!(assessment.artifact_warning.is_none());
}

#[test]
fn missing_age_is_a_validation_warning() {
    let wizard = wizard();
    let session = decided_session("no-age", EligibilityDecision::Eligible);
    let submission = StageTwoSubmission {
        age: None,
        ..eligible_stage_two()
    };

    match wizard.confirm_final(&session, &submission) {
        Err(WizardError::Validation(err)) => assert_eq!(err.fields(), vec!["age"]),
        other => panic!("expected validation warning, got {other:?}"),
    }

    let underage = StageTwoSubmission {
        age: Some(19.0),
        ..eligible_stage_two()
    };
    assert!(matches!(
        wizard.confirm_final(&session, &underage),
        Err(WizardError::Validation(_))
    ));
}

#[test]
fn unavailable_artifact_is_reported_without_blocking_the_decision() {
    let wizard = EligibilityWizard::new(Arc::new(engine_with(missing_artifact())));
    let session = decided_session("artifact", EligibilityDecision::Eligible);

    let assessment = wizard
        .confirm_final(&session, &eligible_stage_two())
        .expect("decision still computed");

    assert_eq!(assessment.decision, EligibilityDecision::Eligible);
    let warning = assessment.artifact_warning.expect("artifact warning reported");
    assert!(warning.starts_with("Error loading model"));
}

#[test]
fn repeated_inputs_reuse_cached_decisions() {
    let wizard = wizard();
    let session = fresh_session("cache");

    let first = wizard
        .check_initial(&session, &eligible_stage_one())
        .expect("first");
    let second = wizard
        .check_initial(&session, &eligible_stage_one())
        .expect("second");

    assert_eq!(
        first.initial_eligibility_result,
        second.initial_eligibility_result
    );
    assert_eq!(wizard.engine().cached_decisions(), (1, 0));
}
