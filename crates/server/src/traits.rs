//! Server traits
//!
//! [`Server`] is the lifecycle every hosted listener follows; [`ServerExt`]
//! adds the spawn / signal-handling conveniences on top of it.

use async_trait::async_trait;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Core server trait.
///
/// # Implementors
///
/// - [`HttpServer`](crate::http::HttpServer) - HTTP server using Axum
///
/// # Example
///
/// ```ignore
/// use server::{HttpServer, ServerConfig, ServerExt};
///
/// let server = HttpServer::new(ServerConfig::new("127.0.0.1", 5000), router);
/// server.run_with_ctrl_c().await?;
/// ```
#[async_trait]
pub trait Server: Send + Sync + 'static {
    /// Name used in log lines.
    fn name(&self) -> &str;

    /// Returns the address the server is bound to, if running.
    fn address(&self) -> Option<SocketAddr>;

    fn is_running(&self) -> bool;

    /// Runs the server until the shutdown token is cancelled.
    ///
    /// Implementations bind, serve until `shutdown` fires, drain in-flight
    /// requests and return `Ok(())`. A bind failure is returned immediately.
    ///
    /// ```ignore
    /// let token = CancellationToken::new();
    /// let handle = tokio::spawn({
    ///     let token = token.clone();
    ///     async move { server.run(token).await }
    /// });
    ///
    /// token.cancel();
    /// handle.await??;
    /// ```
    async fn run(&self, shutdown: CancellationToken) -> Result<()>;
}

/// Extension trait, implemented for every [`Server`].
pub trait ServerExt: Server + Sized {
    /// Spawns the server on a new task and returns a handle and shutdown token.
    fn spawn(self) -> (tokio::task::JoinHandle<Result<()>>, CancellationToken) {
        let token = CancellationToken::new();
        let token_clone = token.clone();
        let handle = tokio::spawn(async move { self.run(token_clone).await });
        (handle, token)
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    fn run_with_ctrl_c(self) -> impl std::future::Future<Output = Result<()>> + Send {
        async move {
            let shutdown = crate::shutdown::ShutdownController::with_signals();
            self.run(shutdown.token()).await
        }
    }
}

impl<T: Server + Sized> ServerExt for T {}
