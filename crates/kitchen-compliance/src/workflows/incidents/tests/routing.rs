use super::common::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn triage_endpoint_accepts_localized_severity() {
    let (service, register) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/triage",
            json!({
                "title": "Lekkasje",
                "description": "Fryseren lekker og temperaturen stiger",
                "severity": "høy"
            }),
        ))
        .await
        .expect("triage response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["category"], "temperature");
    assert_eq!(payload["tier"], "high");
    assert_eq!(payload["remediation_steps"].as_array().map(Vec::len), Some(5));
    assert!(register.records.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn triage_endpoint_treats_unknown_severity_as_missing() {
    let (service, _register) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/triage",
            json!({ "description": "Noe uvanlig", "severity": "???" }),
        ))
        .await
        .expect("triage response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["category"], "general");
    assert_eq!(payload["tier"], "standard");
    assert_eq!(payload["consequences"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn report_then_close_round_trip() {
    let (service, _register) = build_service();
    let app = router_with_service(service);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/incidents",
            json!({
                "title": "Brann",
                "description": "Brann i frityrgryta, slukket med brannteppe",
                "preselected_severity": "critical"
            }),
        ))
        .await
        .expect("report response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = read_json_body(response).await;
    let id = created["incident_id"]
        .as_str()
        .expect("incident id")
        .to_string();
    assert_eq!(created["status"], "Åpen");
    assert_eq!(created["category"], "Sikkerhet");

    let close_uri = format!("/api/v1/incidents/{id}/close");
    let response = app
        .clone()
        .oneshot(empty_request("POST", &close_uri))
        .await
        .expect("close response");
    assert_eq!(response.status(), StatusCode::OK);
    let closed = read_json_body(response).await;
    assert_eq!(closed["status"], "Lukket");

    let response = app
        .clone()
        .oneshot(empty_request("POST", &close_uri))
        .await
        .expect("second close response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert_eq!(payload["incident_id"], id.as_str());

    let response = app
        .oneshot(empty_request("GET", &format!("/api/v1/incidents/{id}")))
        .await
        .expect("status response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_incident_returns_not_found() {
    let (service, _register) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(empty_request("GET", "/api/v1/incidents/inc-404404"))
        .await
        .expect("status response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["incident_id"], "inc-404404");
    assert_eq!(payload["error"], "incident not found");
}
