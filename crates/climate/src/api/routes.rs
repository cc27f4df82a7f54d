//! Axum route definitions for the climate API.

use crate::api::handlers::{self, ClimateApiState};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Create all climate routes.
///
/// # Routes
///
/// - `GET /` - Route index (HTML)
/// - `GET /api/v1.0/precipitation` - Reference station precipitation
/// - `GET /api/v1.0/stations` - Station names
/// - `GET /api/v1.0/tobs` - Reference station temperatures for the last year
/// - `GET /api/v1.0/:start` - Per-station summary from `start`
/// - `GET /api/v1.0/:start/:end` - Per-station summary from `start` through `end`
///
/// The static routes win over `:start` when both match.
pub fn climate_routes(state: Arc<ClimateApiState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_routes))
        .route("/api/v1.0/precipitation", get(handlers::precipitation))
        .route("/api/v1.0/stations", get(handlers::stations))
        .route("/api/v1.0/tobs", get(handlers::tobs))
        .route("/api/v1.0/:start", get(handlers::summary_from))
        .route("/api/v1.0/:start/:end", get(handlers::summary_between))
        .with_state(state)
}
