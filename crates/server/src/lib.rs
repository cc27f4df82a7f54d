//! Server infrastructure for the Climate API
//!
//! Hosts an axum [`Router`](axum::Router) behind a uniform lifecycle: bind,
//! serve until a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! fires, then drain in-flight requests.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! let config = ServerConfig::new("0.0.0.0", 5000);
//! let server = HttpServer::new(config, router);
//! server.run_with_ctrl_c().await?;
//! ```
//!
//! # Modules
//!
//! - [`config`] - Bind address configuration
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - HTTP server using Axum
//! - [`health`] - Health check endpoint
//! - [`shutdown`] - Graceful shutdown utilities
//! - [`port_validator`] - Early port availability checks

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod port_validator;
pub mod shutdown;
pub mod traits;

pub use config::{ports, ServerConfig};
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthState, HealthStatus};
pub use http::HttpServer;
pub use port_validator::validate_port_available;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
