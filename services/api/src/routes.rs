use crate::infra::{deserialize_optional_date, AppState, CheckEntry, DashboardState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use kitchen_compliance::error::AppError;
use kitchen_compliance::workflows::dashboard::{
    ComplianceSnapshotView, DailyCheckCounts, DegradedSource, TemperatureLogImporter,
};
use kitchen_compliance::workflows::incidents::incident_router;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotRequest {
    #[serde(default)]
    pub(crate) counts: DailyCheckCounts,
    /// Falls back to `counts.open_critical_incidents > 0` when omitted.
    #[serde(default)]
    pub(crate) open_incidents_exist: Option<bool>,
    /// Temperature log export replacing `counts.temperature_readings`.
    #[serde(default)]
    pub(crate) temperature_csv: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) day: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TodayResponse {
    pub(crate) day: NaiveDate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) degraded: Vec<DegradedSource>,
    pub(crate) snapshot: ComplianceSnapshotView,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) day: Option<NaiveDate>,
    #[serde(flatten)]
    pub(crate) entry: CheckEntry,
}

pub(crate) fn with_dashboard_routes(state: DashboardState) -> Router {
    let incidents = incident_router(state.incidents.clone());

    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/dashboard/snapshot", post(snapshot_endpoint))
        .route("/api/v1/dashboard/today", get(today_endpoint))
        .route("/api/v1/checks", post(record_check_endpoint))
        .with_state(state)
        .merge(incidents)
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
        json!({ "status": "ready" })
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

pub(crate) async fn snapshot_endpoint(
    State(state): State<DashboardState>,
    Json(payload): Json<SnapshotRequest>,
) -> Result<Json<ComplianceSnapshotView>, AppError> {
    let SnapshotRequest {
        mut counts,
        open_incidents_exist,
        temperature_csv,
        day,
    } = payload;

    if let Some(csv) = temperature_csv {
        let day = day.unwrap_or_else(|| Local::now().date_naive());
        counts.temperature_readings =
            TemperatureLogImporter::readings_for_day(Cursor::new(csv.into_bytes()), day)?;
    }

    let open_incidents_exist = open_incidents_exist.unwrap_or(counts.open_critical_incidents > 0);
    let snapshot = state
        .aggregator
        .compute_snapshot(&counts, open_incidents_exist);
    Ok(Json(snapshot.to_view()))
}

pub(crate) async fn today_endpoint(State(state): State<DashboardState>) -> Json<TodayResponse> {
    let refreshed = state.latest_for(Local::now().date_naive()).await;
    Json(TodayResponse {
        day: refreshed.day,
        degraded: refreshed.degraded,
        snapshot: refreshed.snapshot.to_view(),
    })
}

/// Record one check. A check for today replaces the cached snapshot; one for
/// another day is scored without touching it.
pub(crate) async fn record_check_endpoint(
    State(state): State<DashboardState>,
    Json(payload): Json<CheckRequest>,
) -> Response {
    let today = Local::now().date_naive();
    let day = payload.day.unwrap_or(today);
    if let Err(err) = state.checks.record(day, payload.entry) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response();
    }

    let refreshed = if day == today {
        state.refresh(day).await
    } else {
        state.compute(day)
    };
    info!(%day, "check recorded");
    (
        StatusCode::CREATED,
        Json(json!({
            "day": day,
            "compliance_percent": refreshed.snapshot.compliance_percent_rounded(),
            "risk_level": refreshed.snapshot.risk_level,
        })),
    )
        .into_response()
}
