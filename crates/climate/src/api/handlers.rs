//! HTTP request handlers for the climate API.

use crate::api::models::{ErrorResponse, ROUTE_INDEX_HTML};
use crate::error::ClimateError;
use crate::service::ClimateService;
use crate::types::{PrecipitationRecord, TemperatureRecord, TemperatureSummary};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use std::sync::Arc;
use tracing::{error, warn};

/// Shared state for climate API handlers.
pub struct ClimateApiState {
    pub service: Arc<ClimateService>,
}

impl ClimateApiState {
    pub fn new(service: Arc<ClimateService>) -> Self {
        Self { service }
    }
}

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn error_response(err: ClimateError, action: &str) -> (StatusCode, Json<ErrorResponse>) {
    if err.is_client_error() {
        warn!(%err, "Rejected request");
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
    } else {
        error!(%err, "Failed to {}", action);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(format!("Failed to {}: {}", action, err))),
        )
    }
}

/// GET /
pub async fn list_routes() -> Html<&'static str> {
    Html(ROUTE_INDEX_HTML)
}

/// GET /api/v1.0/precipitation
pub async fn precipitation(
    State(state): State<Arc<ClimateApiState>>,
) -> ApiResult<Vec<PrecipitationRecord>> {
    state
        .service
        .precipitation()
        .await
        .map(Json)
        .map_err(|e| error_response(e, "load precipitation"))
}

/// GET /api/v1.0/stations
pub async fn stations(State(state): State<Arc<ClimateApiState>>) -> ApiResult<Vec<String>> {
    state
        .service
        .station_names()
        .await
        .map(Json)
        .map_err(|e| error_response(e, "list stations"))
}

/// GET /api/v1.0/tobs
pub async fn tobs(
    State(state): State<Arc<ClimateApiState>>,
) -> ApiResult<Vec<TemperatureRecord>> {
    state
        .service
        .recent_temperatures()
        .await
        .map(Json)
        .map_err(|e| error_response(e, "load temperature observations"))
}

/// GET /api/v1.0/:start
pub async fn summary_from(
    State(state): State<Arc<ClimateApiState>>,
    Path(start): Path<String>,
) -> ApiResult<Vec<TemperatureSummary>> {
    state
        .service
        .temperature_summary(&start, None)
        .await
        .map(Json)
        .map_err(|e| error_response(e, "summarize temperatures"))
}

/// GET /api/v1.0/:start/:end
pub async fn summary_between(
    State(state): State<Arc<ClimateApiState>>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Vec<TemperatureSummary>> {
    state
        .service
        .temperature_summary(&start, Some(end.as_str()))
        .await
        .map(Json)
        .map_err(|e| error_response(e, "summarize temperatures"))
}
