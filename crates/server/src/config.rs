//! Server configuration

/// Default port assignments
pub mod ports {
    /// Default HTTP port for the query API
    pub const HTTP: u16 = 5000;
}

/// Bind address for the HTTP server.
///
/// # Example
///
/// ```
/// use server::config::ServerConfig;
///
/// let config = ServerConfig::new("127.0.0.1", 5000);
/// assert_eq!(config.http_port, 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// HTTP port; 0 asks the OS for an ephemeral port
    pub http_port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, http_port: u16) -> Self {
        Self {
            host: host.into(),
            http_port,
        }
    }

    /// Loopback config on an ephemeral port, for tests.
    pub fn ephemeral() -> Self {
        Self::new("127.0.0.1", 0)
    }

    /// `host:port` string; host names are resolved at bind time.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", ports::HTTP)
    }
}
