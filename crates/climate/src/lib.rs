//! # Climate Crate
//!
//! Read-only query layer over a pre-populated climate-observation dataset
//! (weather stations plus their daily precipitation and temperature readings).
//!
//! ## Key Components
//!
//! - **Domain Types**: `Station`, `Observation` and the per-endpoint output records
//! - **Traits**: `ClimateStore` for storage abstraction
//! - **Service**: `ClimateService` binds the reference station / lookback window
//!   and the date handling mode to the store queries
//! - **In-Memory Store**: same query semantics as the SQLite store, for tests
//!
//! ```text
//!   GET /api/v1.0/...      ┌────────────────┐      ┌──────────────────────┐
//!  ──────────────────────▶ │  api handlers  │ ───▶ │    ClimateService    │
//!                          └────────────────┘      └──────────┬───────────┘
//!                                                             │ one query
//!                                                             ▼
//!                                     ┌─────────────────────────────────────┐
//!                                     │ ClimateStore                        │
//!                                     │  SqliteClimateStore │ InMemory...   │
//!                                     └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod service;
pub mod store;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod db;

#[cfg(feature = "api")]
pub mod api;

pub use error::{ClimateError, ClimateResult};
pub use service::ClimateService;
pub use store::{ClimateStore, InMemoryClimateStore};
pub use types::{
    Observation, PrecipitationRecord, Station, SummaryRange, TemperatureRecord,
    TemperatureSummary,
};

#[cfg(feature = "sqlite")]
pub use db::SqliteClimateStore;

#[cfg(feature = "api")]
pub use api::{climate_routes, handlers::ClimateApiState};
