//! Observability infrastructure for the Climate API
//!
//! Structured logging via `tracing`, configured once per process.
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("climate-api", LogFormat::Pretty)?;
//! ```

pub mod logging;

pub use logging::{init_logging, LogFormat};
