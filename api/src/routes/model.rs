//! Model metadata endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use castor_appstate::{AppState, ModelInfo};

/// `GET /model` — configured model parameters plus the engine and
/// tokenizer readiness flags.
pub async fn model(State(state): State<Arc<AppState>>) -> Json<ModelInfo> {
    tracing::debug!("Model info request");
    Json(state.model_info())
}
