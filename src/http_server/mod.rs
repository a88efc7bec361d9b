//! # HTTP Server Module
//!
//! Thin inbound surface over the risk engine. No authentication; the
//! assessment log lives in memory.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/configs/risk-wizard` - Wizard configuration document
//! - `/risk-evaluations` - Risk classification
//! - `/systems/:system_id/risk` - Recorded assessments per AI system

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod risk_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use risk_routes::{RiskAssessment, RiskEvaluationRequest, RiskState};
pub use server::HttpServer;
