use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::IncidentText;
use super::register::{IncidentId, IncidentRegister, RegisterError};
use super::service::{IncidentServiceError, IncidentTriageService};

/// Router exposing triage and the incident register over HTTP.
pub fn incident_router<R>(service: Arc<IncidentTriageService<R>>) -> Router
where
    R: IncidentRegister + 'static,
{
    Router::new()
        .route("/api/v1/triage", post(triage_handler::<R>))
        .route("/api/v1/incidents", post(report_handler::<R>))
        .route("/api/v1/incidents/:incident_id", get(status_handler::<R>))
        .route(
            "/api/v1/incidents/:incident_id/close",
            post(close_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn triage_handler<R>(
    State(service): State<Arc<IncidentTriageService<R>>>,
    Json(text): Json<IncidentText>,
) -> Response
where
    R: IncidentRegister + 'static,
{
    (StatusCode::OK, Json(service.triage(&text))).into_response()
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<IncidentTriageService<R>>>,
    Json(text): Json<IncidentText>,
) -> Response
where
    R: IncidentRegister + 'static,
{
    match service.report(text, Local::now().date_naive()) {
        Ok(record) => (StatusCode::CREATED, Json(record.view())).into_response(),
        Err(err) => error_response(None, err),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<IncidentTriageService<R>>>,
    Path(incident_id): Path<String>,
) -> Response
where
    R: IncidentRegister + 'static,
{
    let id = IncidentId(incident_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(err) => error_response(Some(&id), err),
    }
}

pub(crate) async fn close_handler<R>(
    State(service): State<Arc<IncidentTriageService<R>>>,
    Path(incident_id): Path<String>,
) -> Response
where
    R: IncidentRegister + 'static,
{
    let id = IncidentId(incident_id);
    match service.close(&id, Local::now().date_naive()) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(err) => error_response(Some(&id), err),
    }
}

fn error_response(id: Option<&IncidentId>, err: IncidentServiceError) -> Response {
    let status = match &err {
        IncidentServiceError::Register(RegisterError::NotFound) => StatusCode::NOT_FOUND,
        IncidentServiceError::Register(RegisterError::Conflict)
        | IncidentServiceError::AlreadyClosed(_) => StatusCode::CONFLICT,
        IncidentServiceError::Register(RegisterError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = match id {
        Some(id) => json!({ "incident_id": id.0, "error": err.to_string() }),
        None => json!({ "error": err.to_string() }),
    };
    (status, Json(payload)).into_response()
}
