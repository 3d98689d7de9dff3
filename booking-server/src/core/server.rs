//! Server Implementation
//!
//! Binds the HTTP listener and serves the router until Ctrl-C.

use std::future::IntoFuture;
use std::time::Duration;

use crate::core::{Config, Result, ServerState};
use crate::routes;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let app = routes::build_app(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Booking server listening on {}", listener.local_addr()?);

        let grace = Duration::from_millis(self.config.shutdown_timeout_ms);
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
                let _ = shutdown_tx.send(());
            })
            .into_future();

        tokio::select! {
            result = serve => result?,
            _ = async {
                let _ = shutdown_rx.await;
                tokio::time::sleep(grace).await;
            } => {
                tracing::warn!(
                    timeout_ms = self.config.shutdown_timeout_ms,
                    "Graceful shutdown timed out, dropping open connections"
                );
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}
