use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use loan_eligibility::error::AppError;
use loan_eligibility::workflows::eligibility::form::{APP_TITLE, HOME_MESSAGE, PAGES};
use loan_eligibility::workflows::eligibility::{
    eligibility_router, EligibilityService, InitialScreeningImporter, ScreeningSummary,
    SessionStore,
};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ScreeningRequest {
    pub(crate) csv: String,
}

pub(crate) fn with_eligibility_routes<S>(service: Arc<EligibilityService<S>>) -> axum::Router
where
    S: SessionStore + 'static,
{
    eligibility_router(service)
        .route("/", axum::routing::get(home_endpoint))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/eligibility/screening",
            axum::routing::post(screening_endpoint),
        )
}

pub(crate) async fn home_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "title": APP_TITLE,
        "message": HOME_MESSAGE,
        "pages": PAGES,
    }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "artifact_loaded": state.engine.artifact().artifact().is_some() })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn screening_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScreeningRequest>,
) -> Result<Json<ScreeningSummary>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let summary = InitialScreeningImporter::from_reader(reader, &state.engine)?;
    Ok(Json(summary))
}
