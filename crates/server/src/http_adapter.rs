//! REST API over the lead sheet.
//!
//! Failures upstream are logged with their full report and answered with a short
//! plain-text 500; clients never see the report itself.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use error_stack::Report;
use leads_core::{adapters::config::server_config::ServerConfig, Lead, LeadService, LeadServiceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Shared API state
#[derive(Clone)]
struct ApiState {
    leads: Arc<LeadService>,
}

pub async fn serve(config: &ServerConfig, lead_service: Arc<LeadService>) -> std::io::Result<()> {
    let addr = config.bind_address();
    let app = router(lead_service);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    axum::serve(listener, app).await
}

pub fn router(lead_service: Arc<LeadService>) -> Router {
    let shared_state = Arc::new(ApiState {
        leads: lead_service,
    });

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/leads", get(list_leads))
        .route("/api/filter-leads", get(filter_leads))
        .route("/api/update-call/{index}", post(update_call))
        .route("/api/update-status/{index}", post(update_status))
        .route("/api/update-next-call/{index}", post(update_next_call))
        .route("/api/update-remarks/{index}", post(update_remarks))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

#[derive(Debug, Deserialize)]
struct FilterQuery {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateNextCallRequest {
    next_call_date: String,
}

#[derive(Debug, Deserialize)]
struct UpdateRemarksRequest {
    remark: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    success: bool,
    updated_row: Lead,
}

impl UpdateResponse {
    fn updated(lead: Lead) -> Json<Self> {
        Json(Self {
            success: true,
            updated_row: lead,
        })
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    success: bool,
    status: &'static str,
}

/// A 500 carrying a short message for the client.
#[derive(Debug)]
struct ApiError {
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.message).into_response()
    }
}

/// Logs the report and turns it into an [`ApiError`] with `message`.
fn failure(message: &'static str) -> impl FnOnce(Report<LeadServiceError>) -> ApiError {
    move |report| {
        error!("{}: {:?}", message, report);
        ApiError { message }
    }
}

// API Handlers

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "ok",
    })
}

async fn list_leads(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Lead>>, ApiError> {
    state
        .leads
        .list_leads()
        .await
        .map(Json)
        .map_err(failure("Error fetching leads"))
}

async fn filter_leads(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<FilterQuery>,
) -> Result<Json<Vec<Lead>>, ApiError> {
    state
        .leads
        .filter_leads(params.date.as_deref())
        .await
        .map(Json)
        .map_err(failure("Error filtering leads"))
}

async fn update_call(
    State(state): State<Arc<ApiState>>,
    Path(index): Path<usize>,
) -> Result<Json<UpdateResponse>, ApiError> {
    state
        .leads
        .register_call(index)
        .await
        .map(UpdateResponse::updated)
        .map_err(failure("Error updating call"))
}

async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(index): Path<usize>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    state
        .leads
        .update_status(index, &request.status)
        .await
        .map(UpdateResponse::updated)
        .map_err(failure("Error updating status"))
}

async fn update_next_call(
    State(state): State<Arc<ApiState>>,
    Path(index): Path<usize>,
    Json(request): Json<UpdateNextCallRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    state
        .leads
        .update_next_call_date(index, &request.next_call_date)
        .await
        .map(UpdateResponse::updated)
        .map_err(failure("Error updating next call date"))
}

async fn update_remarks(
    State(state): State<Arc<ApiState>>,
    Path(index): Path<usize>,
    Json(request): Json<UpdateRemarksRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    state
        .leads
        .add_remark(index, &request.remark)
        .await
        .map(UpdateResponse::updated)
        .map_err(failure("Error updating remarks"))
}
