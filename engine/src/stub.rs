//! CPU stub engine.
//!
//! Stands in for the accelerator engine: initialization reads the plan
//! file when present and inference returns a zeroed logits vector sized
//! to the configured vocabulary.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::ModelConfig;
use crate::error::{EngineError, Result};
use crate::InferenceBackend;

/// Initialize-once CPU engine stub.
pub struct StubEngine {
    config: ModelConfig,
    initialized: AtomicBool,
}

impl StubEngine {
    /// Create an uninitialized engine with the given model configuration.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            initialized: AtomicBool::new(false),
        }
    }

    /// Initialize the engine from a serialized plan file.
    ///
    /// Fails if already initialized. A missing plan file is tolerated:
    /// the stub runs without weights, so it logs and continues.
    pub fn initialize<P: AsRef<Path>>(&self, engine_path: P) -> Result<()> {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(EngineError::AlreadyInitialized);
        }

        let engine_path = engine_path.as_ref();
        match std::fs::metadata(engine_path) {
            Ok(meta) => {
                info!(
                    path = %engine_path.display(),
                    size_bytes = meta.len(),
                    model = %self.config.model_name,
                    "Engine plan file found (CPU stub, weights not executed)"
                );
            }
            Err(_) => {
                warn!(
                    path = %engine_path.display(),
                    "Engine plan file not found; running in CPU stub mode"
                );
            }
        }

        Ok(())
    }

    /// Whether `initialize` has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// The model configuration this engine was built with.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

#[async_trait]
impl InferenceBackend for StubEngine {
    async fn infer(&self, token_ids: &[i32]) -> Result<Vec<f32>> {
        if !self.is_initialized() {
            return Err(EngineError::NotInitialized);
        }

        debug!(input_tokens = token_ids.len(), "Stub inference");
        Ok(vec![0.0; self.config.vocab_size as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_initialize_fails() {
        let engine = StubEngine::new(ModelConfig::default());
        assert!(engine.initialize("missing.plan").is_ok());
        assert!(matches!(
            engine.initialize("missing.plan"),
            Err(EngineError::AlreadyInitialized)
        ));
    }

    #[tokio::test]
    async fn test_infer_before_initialize_fails() {
        let engine = StubEngine::new(ModelConfig::default());
        let result = engine.infer(&[1, 2, 3]).await;
        assert!(matches!(result, Err(EngineError::NotInitialized)));
    }

    #[tokio::test]
    async fn test_infer_returns_vocab_sized_logits() {
        let config = ModelConfig {
            vocab_size: 128,
            ..Default::default()
        };
        let engine = StubEngine::new(config);
        engine.initialize("missing.plan").unwrap();

        let logits = engine.infer(&[1, 2, 3]).await.unwrap();
        assert_eq!(logits.len(), 128);
    }

    #[test]
    fn test_initialize_with_existing_plan_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let engine = StubEngine::new(ModelConfig::default());
        assert!(engine.initialize(file.path()).is_ok());
        assert!(engine.is_initialized());
    }
}
