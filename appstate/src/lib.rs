//! Shared application state for the Castor server.
//!
//! Owns the tokenizer handle, the inference backend, and the request
//! orchestrator. Transport layers hold an `Arc<AppState>` and call into
//! it; business logic lives here, not in the HTTP crate.

pub mod orchestrator;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use castor_engine::{InferenceBackend, ModelConfig};
use castor_tokenization::TokenizerHandle;

pub use orchestrator::{InferOutcome, InferResponse, RequestOrchestrator};

/// `GET /health` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInfo {
    pub status: String,
    pub model: String,
    pub port: u16,
}

/// `GET /model` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub max_batch_size: u32,
    pub max_seq_length: u32,
    pub vocab_size: u32,
    pub hidden_dim: u32,
    pub num_layers: u32,
    pub initialized: bool,
    pub tokenizer_loaded: bool,
}

/// Dependency-injected server state shared across requests.
///
/// Everything here is read-only after construction; the only mutable
/// resource is the backend call path, which the orchestrator guards.
pub struct AppState {
    tokenizer: Arc<TokenizerHandle>,
    orchestrator: RequestOrchestrator,
    config: ModelConfig,
    engine_initialized: bool,
    port: u16,
}

impl AppState {
    /// Assemble state from its collaborators.
    ///
    /// `engine_initialized` is a snapshot taken after engine setup; engine
    /// initialization is one-shot and irreversible, so the snapshot stays
    /// accurate for the process lifetime.
    pub fn new(
        tokenizer: Arc<TokenizerHandle>,
        backend: Arc<dyn InferenceBackend>,
        config: ModelConfig,
        engine_initialized: bool,
        port: u16,
        infer_timeout: Duration,
    ) -> Self {
        let orchestrator =
            RequestOrchestrator::new(tokenizer.clone(), backend, infer_timeout);
        Self {
            tokenizer,
            orchestrator,
            config,
            engine_initialized,
            port,
        }
    }

    /// Orchestrate one inference request from its raw body.
    pub async fn run_infer(&self, body: &[u8]) -> InferOutcome {
        self.orchestrator.run_infer(body).await
    }

    pub fn health_info(&self) -> HealthInfo {
        HealthInfo {
            status: "ok".to_string(),
            model: self.config.model_name.clone(),
            port: self.port,
        }
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_name: self.config.model_name.clone(),
            max_batch_size: self.config.max_batch_size,
            max_seq_length: self.config.max_seq_length,
            vocab_size: self.config.vocab_size,
            hidden_dim: self.config.hidden_dim,
            num_layers: self.config.num_layers,
            initialized: self.engine_initialized,
            tokenizer_loaded: self.tokenizer.is_loaded(),
        }
    }
}
