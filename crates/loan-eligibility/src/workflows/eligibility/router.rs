use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{EligibilityDecision, StageOneSubmission, StageTwoSubmission};
use super::form::EligibilityFormLayout;
use super::repository::{SessionStore, SessionStoreError};
use super::service::EligibilityService;
use super::session::{SessionId, SessionView};
use super::validation::SubmissionStage;
use super::wizard::WizardError;

/// Body returned after "Check Initial Eligibility".
#[derive(Debug, Clone, Serialize)]
pub struct InitialEligibilityResponse {
    pub result: EligibilityDecision,
    pub message: String,
    pub session: SessionView,
}

/// Body returned after "Confirm Final Eligibility".
#[derive(Debug, Clone, Serialize)]
pub struct FinalEligibilityResponse {
    pub session_id: SessionId,
    pub result: EligibilityDecision,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_warning: Option<String>,
}

/// Router builder exposing the two-step wizard over HTTP.
pub fn eligibility_router<S>(service: Arc<EligibilityService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/eligibility/form", get(form_handler))
        .route("/api/v1/eligibility/sessions", post(start_handler::<S>))
        .route(
            "/api/v1/eligibility/sessions/:session_id",
            get(session_handler::<S>).delete(end_handler::<S>),
        )
        .route(
            "/api/v1/eligibility/sessions/:session_id/initial",
            post(initial_handler::<S>),
        )
        .route(
            "/api/v1/eligibility/sessions/:session_id/final",
            post(final_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn form_handler() -> Response {
    (StatusCode::OK, axum::Json(EligibilityFormLayout::standard())).into_response()
}

pub(crate) async fn start_handler<S>(State(service): State<Arc<EligibilityService<S>>>) -> Response
where
    S: SessionStore + 'static,
{
    match service.start_session() {
        Ok(session) => (StatusCode::CREATED, axum::Json(session.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn session_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.session(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, axum::Json(session.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn end_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.end_session(&SessionId(session_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn initial_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Path(session_id): Path<String>,
    submission: Result<axum::Json<StageOneSubmission>, JsonRejection>,
) -> Response
where
    S: SessionStore + 'static,
{
    let axum::Json(submission) = match submission {
        Ok(submission) => submission,
        Err(rejection) => return rejected_submission(SubmissionStage::Initial, rejection),
    };
    match service.check_initial(&SessionId(session_id), &submission) {
        Ok(session) => {
            let result = session
                .initial_eligibility_result
                .unwrap_or(EligibilityDecision::NotEligible);
            let body = InitialEligibilityResponse {
                result,
                message: format!("Initial Loan Eligibility Result: {result}"),
                session: session.view(),
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn final_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Path(session_id): Path<String>,
    submission: Result<axum::Json<StageTwoSubmission>, JsonRejection>,
) -> Response
where
    S: SessionStore + 'static,
{
    let axum::Json(submission) = match submission {
        Ok(submission) => submission,
        Err(rejection) => return rejected_submission(SubmissionStage::Final, rejection),
    };
    let id = SessionId(session_id);
    match service.confirm_final(&id, &submission) {
        Ok(assessment) => {
            let body = FinalEligibilityResponse {
                session_id: id,
                result: assessment.decision,
                message: format!("Final Loan Eligibility Result: {}", assessment.decision),
                artifact_warning: assessment.artifact_warning,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// Undecodable bodies get the same `{warning, fields}` shape as a failed validation.
fn rejected_submission(stage: SubmissionStage, rejection: JsonRejection) -> Response {
    let detail = rejection.body_text();
    let layout = EligibilityFormLayout::standard();
    let step = match stage {
        SubmissionStage::Initial => &layout.initial,
        SubmissionStage::Final => &layout.confirmation,
    };
    let fields: Vec<&'static str> = step
        .fields
        .iter()
        .map(|field| field.name)
        .filter(|name| detail.contains(&format!("{name}: ")))
        .collect();

    let status = match rejection {
        JsonRejection::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        other => other.status(),
    };
    let payload = json!({
        "warning": format!("{}: {detail}", stage.prompt()),
        "fields": fields,
    });
    (status, axum::Json(payload)).into_response()
}

fn error_response(err: WizardError) -> Response {
    match err {
        WizardError::Validation(validation) => {
            let fields = validation.fields();
            let payload = json!({
                "warning": validation.to_string(),
                "fields": fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        WizardError::StageTwoLocked { .. } => {
            let payload = json!({
                "error": err.to_string(),
                "initial_eligibility_result": err.initial_result(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        WizardError::Session(SessionStoreError::NotFound) => {
            let payload = json!({ "error": "session not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        WizardError::Session(SessionStoreError::Conflict) => {
            let payload = json!({ "error": "session already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
