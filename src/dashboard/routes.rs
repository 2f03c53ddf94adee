//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`
//! and holds only read-only configuration plus a request counter.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::engine::input::CalculationRequest;
use crate::engine::report::{self, ReportLine, INVALID_INPUT_MESSAGE};
use crate::engine::Calculator;
use crate::model::ModelConfig;
use crate::strategy::StrategyConfig;
use crate::types::{Insights, OddsApexError};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub name: String,
    pub calculator: Calculator,
    pub started_at: DateTime<Utc>,
    pub calculations: AtomicU64,
}

impl DashboardState {
    pub fn new(name: impl Into<String>, calculator: Calculator) -> Self {
        Self {
            name: name.into(),
            calculator,
            started_at: Utc::now(),
            calculations: AtomicU64::new(0),
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CalculationResponse {
    pub insights: Insights,
    pub lines: Vec<ReportLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub lines: Vec<ReportLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    pub market: String,
    pub model: ModelConfig,
    pub strategy: StrategyConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub name: String,
    pub version: String,
    pub started_at: String,
    pub uptime_secs: i64,
    pub calculations: u64,
}

/// Calculation failure as an HTTP response.
pub struct ApiError(pub OddsApexError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            OddsApexError::InvalidInput { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_input",
                INVALID_INPUT_MESSAGE.to_string(),
            ),
            OddsApexError::DegenerateDistribution { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "model_degenerate",
                self.0.to_string(),
            ),
            OddsApexError::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "config_error",
                msg.clone(),
            ),
        };
        let body = ErrorResponse {
            error: code.to_string(),
            message,
            lines: report::render_error(&self.0),
        };
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/calculate
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculationRequest>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let calculation_id = Uuid::new_v4();
    state.calculations.fetch_add(1, Ordering::Relaxed);

    let result = state.calculator.calculate(&request);
    info!(
        %calculation_id,
        ok = result.is_ok(),
        "Calculation served"
    );

    let insights = result.map_err(ApiError)?;
    Ok(Json(CalculationResponse {
        lines: report::render(&insights),
        insights,
    }))
}

/// GET /api/config
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let model = state.calculator.model_config().clone();
    Json(ConfigResponse {
        market: model.market_label(),
        model,
        strategy: state.calculator.strategy_config().clone(),
    })
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let uptime = (Utc::now() - state.started_at).num_seconds();
    Json(StatusResponse {
        name: state.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at.to_rfc3339(),
        uptime_secs: uptime,
        calculations: state.calculations.load(Ordering::Relaxed),
    })
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
