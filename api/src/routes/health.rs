//! Health check endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use castor_appstate::{AppState, HealthInfo};

/// `GET /health` — basic liveness information for probes and load
/// balancers. No authentication, no side effects.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthInfo> {
    tracing::debug!("Health check request");
    Json(state.health_info())
}
