//! Inference backend boundary for the Castor server.
//!
//! The rest of the system only sees [`InferenceBackend`]: a capability
//! that turns a token-ID sequence into logits or an error. [`StubEngine`]
//! is the CPU stand-in used until a real accelerator engine is wired in.

pub mod config;
pub mod error;
mod stub;

use async_trait::async_trait;

pub use config::ModelConfig;
pub use error::{EngineError, Result as EngineResult};
pub use stub::StubEngine;

/// Opaque inference capability: token IDs in, logits out.
///
/// No contract beyond this signature is assumed about the backend. The
/// backend is not required to be reentrant; callers that share one
/// instance across in-flight requests serialize their calls.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn infer(&self, token_ids: &[i32]) -> EngineResult<Vec<f32>>;
}
