//! Inference endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use castor_appstate::{AppState, InferOutcome};

use crate::error::ApiError;

/// `POST /infer` — run one prompt through tokenize -> infer -> respond.
///
/// The body is passed to the orchestrator as raw bytes; parse and
/// validation outcomes (and their status codes) are decided there, not by
/// an extractor.
pub async fn infer(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.run_infer(&body).await {
        InferOutcome::Success(response) => Json(response).into_response(),
        InferOutcome::BadRequest { reason } => ApiError::BadRequest(reason).into_response(),
        InferOutcome::InferenceFailure { reason } => {
            ApiError::InferenceFailure(reason).into_response()
        }
    }
}
