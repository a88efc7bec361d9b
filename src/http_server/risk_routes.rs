//! Risk HTTP Routes
//!
//! - `GET  /configs/risk-wizard`        wizard document, as configured
//! - `POST /risk-evaluations`           evaluate an answer set
//! - `POST /systems/:system_id/risk`    evaluate and record an assessment
//! - `GET  /systems/:system_id/risk`    recorded assessments, oldest first

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::errors::{ApiError, ApiResult};
use crate::answers::AnswerSet;
use crate::engine::RiskEngine;
use crate::evaluator::EvaluationResult;
use crate::observability::{log_event_with_fields, Event};
use crate::rules::LoadedRuleTable;

// ==================
// Shared State
// ==================

/// Risk state shared across handlers
#[derive(Debug)]
pub struct RiskState {
    pub engine: Arc<RiskEngine>,
    /// In-memory assessment log keyed by system id
    assessments: RwLock<BTreeMap<String, Vec<RiskAssessment>>>,
}

impl RiskState {
    pub fn new(engine: Arc<RiskEngine>) -> Self {
        Self {
            engine,
            assessments: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the loaded rule table.
    ///
    /// A cold engine reads the wizard file with blocking I/O, so the first
    /// load runs on the blocking pool instead of an async worker.
    pub async fn loaded(&self) -> ApiResult<Arc<LoadedRuleTable>> {
        if self.engine.is_loaded() {
            return Ok(self.engine.loaded()?);
        }

        let engine = Arc::clone(&self.engine);
        let loaded = tokio::task::spawn_blocking(move || engine.loaded())
            .await
            .map_err(|e| ApiError::Internal(format!("Rule table load task failed: {}", e)))??;
        Ok(loaded)
    }

    /// Appends an assessment to the system's log
    pub async fn record(&self, assessment: RiskAssessment) {
        let mut assessments = self.assessments.write().await;
        assessments
            .entry(assessment.system_id.clone())
            .or_default()
            .push(assessment);
    }

    /// Returns the system's assessments in recording order
    pub async fn list(&self, system_id: &str) -> Vec<RiskAssessment> {
        let assessments = self.assessments.read().await;
        assessments.get(system_id).cloned().unwrap_or_default()
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct RiskEvaluationRequest {
    #[serde(default)]
    pub answers: AnswerSet,
}

/// A recorded evaluation for one AI system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub id: String,
    pub system_id: String,
    /// RFC 3339, UTC
    pub date: String,
    pub classification: String,
    pub justification: String,
    pub obligations: Vec<String>,
}

impl RiskAssessment {
    fn from_result(system_id: String, result: EvaluationResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            system_id,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            classification: result.classification,
            justification: result.justification,
            obligations: result.obligations,
        }
    }
}

// ==================
// Routes
// ==================

/// Create risk routes
pub fn risk_routes(state: Arc<RiskState>) -> Router {
    Router::new()
        .route("/configs/risk-wizard", get(wizard_config_handler))
        .route("/risk-evaluations", post(evaluate_handler))
        .route(
            "/systems/:system_id/risk",
            get(list_assessments_handler).post(create_assessment_handler),
        )
        .with_state(state)
}

async fn wizard_config_handler(State(state): State<Arc<RiskState>>) -> ApiResult<Json<Value>> {
    let loaded = state.loaded().await?;
    Ok(Json(loaded.document.clone()))
}

async fn evaluate_handler(
    State(state): State<Arc<RiskState>>,
    Json(request): Json<RiskEvaluationRequest>,
) -> ApiResult<Json<EvaluationResult>> {
    state.loaded().await?;
    let result = state.engine.evaluate(&request.answers)?;
    Ok(Json(result))
}

async fn create_assessment_handler(
    State(state): State<Arc<RiskState>>,
    Path(system_id): Path<String>,
    Json(request): Json<RiskEvaluationRequest>,
) -> ApiResult<(StatusCode, Json<RiskAssessment>)> {
    let system_id = validate_system_id(system_id)?;
    state.loaded().await?;
    let result = state.engine.evaluate(&request.answers)?;

    let assessment = RiskAssessment::from_result(system_id, result);
    log_event_with_fields(
        Event::AssessmentRecorded,
        &[
            ("assessment_id", assessment.id.as_str()),
            ("classification", assessment.classification.as_str()),
            ("system_id", assessment.system_id.as_str()),
        ],
    );
    state.record(assessment.clone()).await;

    Ok((StatusCode::CREATED, Json(assessment)))
}

async fn list_assessments_handler(
    State(state): State<Arc<RiskState>>,
    Path(system_id): Path<String>,
) -> ApiResult<Json<Vec<RiskAssessment>>> {
    let system_id = validate_system_id(system_id)?;
    Ok(Json(state.list(&system_id).await))
}

fn validate_system_id(system_id: String) -> ApiResult<String> {
    if system_id.trim().is_empty() {
        return Err(ApiError::InvalidSystemId(system_id));
    }
    Ok(system_id)
}
