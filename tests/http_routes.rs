//! HTTP Route Tests
//!
//! Drives the router in-process:
//! - Evaluation endpoint returns classification, justification and obligations
//! - Assessments are recorded per system
//! - Configuration failures map to 500 with the FATAL code

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use riskwizard::engine::RiskEngine;
use riskwizard::http_server::{HttpServer, HttpServerConfig, RiskState};
use riskwizard::rules::RuleTableLoader;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn wizard_doc() -> Value {
    json!({"wizard": {"steps": [
        {"id": "usage", "questions": [{"id": "q1", "type": "text"}]},
        {
            "id": "result",
            "rules": [{"if": {"q1": "not_empty"}, "classification": "alto", "justification": "J1"}],
            "default": {"classification": "minimo", "justification": "D"}
        }
    ]}})
}

fn router_for(engine: RiskEngine) -> Router {
    let state = Arc::new(RiskState::new(Arc::new(engine)));
    HttpServer::build_router(&HttpServerConfig::default(), state)
}

fn router() -> Router {
    router_for(RiskEngine::preloaded(
        RuleTableLoader::from_document(wizard_doc()).unwrap(),
    ))
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// =============================================================================
// Route Tests
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = send(router(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_wizard_config_served_unchanged() {
    let (status, body) = send(router(), "GET", "/configs/risk-wizard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, wizard_doc());
}

#[tokio::test]
async fn test_evaluate_matching_rule() {
    let (status, body) = send(
        router(),
        "POST",
        "/risk-evaluations",
        Some(json!({"answers": {"q1": "yes"}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"], "alto");
    assert_eq!(body["justification"], "J1");
    assert_eq!(body["obligations"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_evaluate_without_answers_uses_default() {
    let (status, body) = send(router(), "POST", "/risk-evaluations", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"], "minimo");
    assert_eq!(body["justification"], "D");
}

#[tokio::test]
async fn test_assessments_recorded_per_system() {
    let router = router();

    let (status, created) = send(
        router.clone(),
        "POST",
        "/systems/sys-1/risk",
        Some(json!({"answers": {"q1": "yes"}})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["system_id"], "sys-1");
    assert_eq!(created["classification"], "alto");

    let (status, listed) = send(router.clone(), "GET", "/systems/sys-1/risk", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);

    let (_, other) = send(router, "GET", "/systems/sys-2/risk", None).await;
    assert_eq!(other, json!([]));
}

#[tokio::test]
async fn test_blank_system_id_rejected() {
    let (status, body) = send(router(), "GET", "/systems/%20/risk", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "RW_INVALID_SYSTEM_ID");
}

#[tokio::test]
async fn test_configuration_error_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_for(RiskEngine::new(dir.path().join("missing.json")));

    let (status, body) = send(router, "POST", "/risk-evaluations", Some(json!({}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "RW_CONFIG_UNREADABLE");
    assert_eq!(body["status"], 500);
}

#[tokio::test(flavor = "current_thread")]
async fn test_cold_engine_loads_on_first_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risk-wizard.json");
    std::fs::write(&path, wizard_doc().to_string()).unwrap();

    let engine = Arc::new(RiskEngine::new(&path));
    let state = Arc::new(RiskState::new(Arc::clone(&engine)));
    let router = HttpServer::build_router(&HttpServerConfig::default(), Arc::clone(&state));
    assert!(!engine.is_loaded());

    let (status, body) = send(
        router.clone(),
        "POST",
        "/risk-evaluations",
        Some(json!({"answers": {"q1": "yes"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"], "alto");
    assert!(engine.is_loaded());

    let (status, config) = send(router, "GET", "/configs/risk-wizard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config, wizard_doc());

    let loaded = state.loaded().await.unwrap();
    assert_eq!(loaded.source, path.display().to_string());
}
