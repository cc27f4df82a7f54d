//! Port validation utilities
//!
//! A successful check does not reserve the port; another process can still
//! take it before the real bind. The bind in `HttpServer::run` is the
//! source of truth, this only gives earlier and clearer feedback at startup.

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Check that the configured HTTP port is in range and currently free.
pub async fn validate_port_available(config: &ServerConfig) -> Result<()> {
    validate_port_range(config.http_port)?;

    let addr = config.bind_address();
    debug!(%addr, "Checking HTTP port");

    match TcpListener::bind(&addr).await {
        Ok(listener) => {
            let local_addr = listener
                .local_addr()
                .map_err(|e| ServerError::bind(addr.clone(), e))?;
            drop(listener);

            info!("HTTP port {} is available ({})", config.http_port, local_addr);
            Ok(())
        }
        Err(e) => {
            error!("HTTP port {} is NOT available: {}", config.http_port, e);
            Err(ServerError::port_in_use(config.http_port, e.to_string()))
        }
    }
}

/// Returns `true` if binding `host:port` currently fails.
pub async fn is_port_in_use(host: &str, port: u16) -> bool {
    let addr = format!("{}:{}", host, port);
    TcpListener::bind(&addr).await.is_err()
}

/// Rejects port 0 and warns on privileged ports.
pub fn validate_port_range(port: u16) -> Result<()> {
    if port == 0 {
        Err(ServerError::ConfigError(
            "Port cannot be 0 (ephemeral port assignment not supported for explicit binding)"
                .to_string(),
        ))
    } else {
        if port < 1024 {
            warn!(
                "Port {} is a privileged port (requires root/admin privileges)",
                port
            );
        }
        Ok(())
    }
}
