//! HTTP API layer for the Castor server, built on axum.
//!
//! Exposes three endpoints over an injected [`AppState`]:
//! - `GET /health` — liveness probe
//! - `GET /model` — model configuration and readiness
//! - `POST /infer` — tokenize a prompt and run inference
//!
//! Transport only: request semantics live in `castor-appstate`.

mod config;
mod error;
mod middleware;
mod router;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use castor_appstate::AppState;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use router::configure_routes;

/// Run the HTTP API server (blocking until shutdown or fatal error).
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server hits a
/// fatal I/O error.
pub async fn run_server(state: Arc<AppState>, config: ApiConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Castor API server listening on http://{}", addr);
    tracing::info!("  GET  /health  - Server health check");
    tracing::info!("  GET  /model   - Get model info");
    tracing::info!("  POST /infer   - Run inference");

    let app = configure_routes(state, &config);
    axum::serve(listener, app).await?;

    Ok(())
}
