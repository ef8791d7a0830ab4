//! Request orchestrator.
//!
//! Sequences one inference request: validate the body, tokenize the
//! prompt, run the backend, assemble the response payload. Each request
//! walks Received -> Validated -> Tokenized -> Inferred -> Responded,
//! exiting early to a bad-request or failure outcome; no state persists
//! across requests.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use castor_engine::InferenceBackend;
use castor_tokenization::TokenizerHandle;

/// Fixed client-visible message for backend failures. Details go to the
/// log, not the wire.
const INFERENCE_FAILURE_MESSAGE: &str = "Inference engine failed to produce output";

/// Successful inference payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferResponse {
    pub prompt: String,
    pub input_tokens: usize,
    pub input_token_ids: Vec<i32>,
    pub output_logits_count: usize,
    pub status: String,
    pub message: String,
}

/// Outcome of one orchestrated request, ready for HTTP mapping.
#[derive(Debug)]
pub enum InferOutcome {
    /// 200: prompt tokenized and inference completed.
    Success(InferResponse),
    /// 400: body failed to parse or lacked a string `prompt`.
    BadRequest { reason: String },
    /// 500: the backend reported failure or timed out.
    InferenceFailure { reason: String },
}

/// Orchestrates tokenize -> infer -> respond for single requests.
///
/// Holds its collaborators by explicit injection; there are no
/// process-wide singletons. The backend is not assumed reentrant, so
/// calls to it are serialized through an async mutex and bounded by a
/// timeout.
pub struct RequestOrchestrator {
    tokenizer: Arc<TokenizerHandle>,
    backend: Arc<dyn InferenceBackend>,
    infer_gate: tokio::sync::Mutex<()>,
    infer_timeout: Duration,
}

impl RequestOrchestrator {
    pub fn new(
        tokenizer: Arc<TokenizerHandle>,
        backend: Arc<dyn InferenceBackend>,
        infer_timeout: Duration,
    ) -> Self {
        Self {
            tokenizer,
            backend,
            infer_gate: tokio::sync::Mutex::new(()),
            infer_timeout,
        }
    }

    /// Run the full pipeline for one raw request body.
    ///
    /// Body validation lives here rather than in an HTTP extractor so the
    /// malformed-body policy is part of the orchestration contract.
    pub async fn run_infer(&self, body: &[u8]) -> InferOutcome {
        // Received -> Validated
        let prompt = match Self::validate(body) {
            Ok(prompt) => prompt,
            Err(reason) => {
                debug!(%reason, "Request rejected");
                return InferOutcome::BadRequest { reason };
            }
        };

        // Validated -> Tokenized. Encode cannot fail: a loaded tokenizer
        // always yields a sequence, placeholder or not.
        let token_ids = self.tokenizer.encode(&prompt);
        debug!(input_tokens = token_ids.len(), "Prompt tokenized");

        // Tokenized -> Inferred, serialized and bounded.
        let logits = {
            let _gate = self.infer_gate.lock().await;
            match tokio::time::timeout(self.infer_timeout, self.backend.infer(&token_ids)).await {
                Ok(Ok(logits)) => logits,
                Ok(Err(e)) => {
                    error!(error = %e, "Inference backend failed");
                    return InferOutcome::InferenceFailure {
                        reason: INFERENCE_FAILURE_MESSAGE.to_string(),
                    };
                }
                Err(_) => {
                    error!(
                        timeout_secs = self.infer_timeout.as_secs(),
                        "Inference backend timed out"
                    );
                    return InferOutcome::InferenceFailure {
                        reason: INFERENCE_FAILURE_MESSAGE.to_string(),
                    };
                }
            }
        };

        // Inferred -> Responded
        info!(
            input_tokens = token_ids.len(),
            output_logits = logits.len(),
            "Inference completed"
        );
        InferOutcome::Success(InferResponse {
            prompt,
            input_tokens: token_ids.len(),
            output_logits_count: logits.len(),
            input_token_ids: token_ids,
            status: "success".to_string(),
            message: "Inference completed".to_string(),
        })
    }

    fn validate(body: &[u8]) -> Result<String, String> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| format!("Malformed request body: {}", e))?;

        match value.get("prompt") {
            Some(Value::String(prompt)) => Ok(prompt.clone()),
            Some(_) => Err("Field 'prompt' must be a string".to_string()),
            None => Err("Missing required field 'prompt'".to_string()),
        }
    }
}
