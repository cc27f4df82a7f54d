//! HTTP API for the climate dataset.
//!
//! ## Modules
//!
//! - `handlers` - One handler per route, sharing `ClimateApiState`
//! - `routes` - Axum router
//! - `models` - Error body and the route index page

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::climate_routes;
