//! REST API handlers for account analysis and operational endpoints.

use adpulse_analysis::CampaignAnalyzer;
use adpulse_core::types::{CampaignRecord, CampaignStatus};
use adpulse_insights::{AccountSnapshot, InsightsProvider, SnapshotProvider, TimeRange};
use adpulse_reporting::AnalysisResponse;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

/// Maximum string field length (account ID, time range token).
const MAX_FIELD_LEN: usize = 256;

/// Maximum number of campaigns accepted in one snapshot ingest.
const MAX_SNAPSHOT_CAMPAIGNS: usize = 10_000;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<SnapshotProvider>,
    pub analyzer: Arc<CampaignAnalyzer>,
    pub node_id: String,
    pub start_time: Instant,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub account_id: String,
    #[serde(default)]
    pub time_range: Option<String>,
}

/// Validate an analysis request at the API boundary.
fn validate_analysis_request(request: &AnalysisRequest) -> Result<(), &'static str> {
    if request.account_id.trim().is_empty() {
        return Err("'account_id' must not be empty");
    }
    if request.account_id.len() > MAX_FIELD_LEN {
        return Err("'account_id' exceeds maximum length");
    }
    if let Some(range) = &request.time_range {
        if range.len() > MAX_FIELD_LEN {
            return Err("'time_range' exceeds maximum length");
        }
    }
    Ok(())
}

/// POST /v1/analysis — analyze all active campaigns in an account.
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> (StatusCode, Json<AnalysisResponse>) {
    if let Err(msg) = validate_analysis_request(&request) {
        warn!(error = msg, "Analysis request validation failed");
        metrics::counter!("api.validation_errors").increment(1);
        return (StatusCode::BAD_REQUEST, Json(AnalysisResponse::failure(msg)));
    }

    let range = request
        .time_range
        .as_deref()
        .map(TimeRange::parse)
        .unwrap_or_default();

    match state
        .analyzer
        .analyze_account(state.provider.as_ref(), &request.account_id, &range)
    {
        Ok(report) => {
            metrics::counter!("api.analyses").increment(1);
            (StatusCode::OK, Json(AnalysisResponse::from_report(&report)))
        }
        Err(e) => {
            error!(error = %e, account_id = %request.account_id, "Account analysis failed");
            metrics::counter!("api.errors").increment(1);
            (
                StatusCode::BAD_GATEWAY,
                Json(AnalysisResponse::failure(e.to_string())),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CampaignsQuery {
    #[serde(default)]
    pub status: Option<CampaignStatus>,
}

#[derive(Serialize)]
pub struct CampaignsResponse {
    pub success: bool,
    pub campaigns: Vec<CampaignRecord>,
    pub count: usize,
}

/// GET /v1/accounts/{account_id}/campaigns — list campaigns in the snapshot.
pub async fn list_campaigns(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(query): Query<CampaignsQuery>,
) -> Result<Json<CampaignsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.provider.campaigns(&account_id, query.status) {
        Ok(campaigns) => {
            let count = campaigns.len();
            Ok(Json(CampaignsResponse {
                success: true,
                campaigns,
                count,
            }))
        }
        Err(e) => {
            warn!(error = %e, account_id = %account_id, "Campaign listing failed");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "invalid_account_id".to_string(),
                    message: e.to_string(),
                }),
            ))
        }
    }
}

#[derive(Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub account_id: String,
    pub campaigns_loaded: usize,
}

/// POST /v1/snapshot — load an account snapshot into the provider.
/// Stands in for the out-of-scope platform retrieval layer.
pub async fn ingest_snapshot(
    State(state): State<AppState>,
    Json(snapshot): Json<AccountSnapshot>,
) -> Result<Json<IngestResponse>, (StatusCode, Json<ErrorResponse>)> {
    if snapshot.campaigns.len() > MAX_SNAPSHOT_CAMPAIGNS {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "snapshot_too_large".to_string(),
                message: format!("snapshot exceeds {MAX_SNAPSHOT_CAMPAIGNS} campaigns"),
            }),
        ));
    }

    let account_id = snapshot.account_id.clone();
    match state.provider.load_account(snapshot) {
        Ok(count) => {
            metrics::counter!("api.snapshots_loaded").increment(1);
            Ok(Json(IngestResponse {
                success: true,
                account_id,
                campaigns_loaded: count,
            }))
        }
        Err(e) => {
            warn!(error = %e, "Snapshot ingest rejected");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "invalid_snapshot".to_string(),
                    message: e.to_string(),
                }),
            ))
        }
    }
}

/// GET /health — Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.start_time.elapsed().as_secs() > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}
