//! JSON API routes.
//!
//! - `GET  /`         service metadata
//! - `POST /campaign` marketing campaign
//! - `POST /pitch`    sales pitch
//! - `POST /score`    lead qualification score
//! - `POST /intel`    company battlecard

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use marketmind_agent::SalesRuntime;
use marketmind_core::errors::{ApplicationError, InterfaceError};
use marketmind_core::{
    CampaignRequest, CampaignResponse, CompanyIntelRequest, CompanyIntelResponse, LeadRequest,
    LeadResponse, PitchRequest, PitchResponse,
};
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

const SERVICE_NAME: &str = "MarketMind API";

#[derive(Clone)]
pub struct ApiState {
    runtime: SalesRuntime,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub detail: String,
    pub correlation_id: String,
}

pub struct ApiError(InterfaceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.user_message(),
            detail: self.0.message().to_string(),
            correlation_id: self.0.correlation_id().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(runtime: SalesRuntime) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/campaign", post(campaign))
        .route("/pitch", post(pitch))
        .route("/score", post(score))
        .route("/intel", post(intel))
        .with_state(ApiState { runtime })
}

async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "online",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec!["/campaign", "/pitch", "/score", "/intel", "/health"],
    })
}

async fn campaign(
    State(state): State<ApiState>,
    Json(request): Json<CampaignRequest>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let result = state.runtime.generate_campaign(&request, &correlation_id).await;
    respond("campaign", result, correlation_id)
}

async fn pitch(
    State(state): State<ApiState>,
    Json(request): Json<PitchRequest>,
) -> Result<Json<PitchResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let result = state.runtime.generate_pitch(&request, &correlation_id).await;
    respond("pitch", result, correlation_id)
}

async fn score(
    State(state): State<ApiState>,
    Json(request): Json<LeadRequest>,
) -> Result<Json<LeadResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let result = state.runtime.score_lead(&request, &correlation_id).await;
    respond("lead_score", result, correlation_id)
}

async fn intel(
    State(state): State<ApiState>,
    Json(request): Json<CompanyIntelRequest>,
) -> Result<Json<CompanyIntelResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let result = state.runtime.company_intel(&request, &correlation_id).await;
    respond("company_intel", result, correlation_id)
}

fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

fn respond<T>(
    use_case: &'static str,
    result: Result<T, ApplicationError>,
    correlation_id: String,
) -> Result<Json<T>, ApiError> {
    result.map(Json).map_err(|failure| {
        let interface = failure.into_interface(correlation_id);
        match &interface {
            InterfaceError::BadRequest { message, correlation_id } => warn!(
                event_name = "api.request.rejected",
                correlation_id = %correlation_id,
                use_case,
                detail = %message,
                "request rejected"
            ),
            InterfaceError::Internal { message, correlation_id } => error!(
                event_name = "api.request.failed",
                correlation_id = %correlation_id,
                use_case,
                detail = %message,
                "request failed"
            ),
        }
        ApiError(interface)
    })
}
