//! Model configuration and metadata.

use serde::{Deserialize, Serialize};

/// Static model configuration reported by the `/model` endpoint and used
/// to size the stub engine's logits output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_name: String,
    pub max_batch_size: u32,
    pub max_seq_length: u32,
    pub vocab_size: u32,
    pub hidden_dim: u32,
    pub num_layers: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: "llama-2-7b".to_string(),
            max_batch_size: 1,
            max_seq_length: 4096,
            vocab_size: 32000,
            hidden_dim: 4096,
            num_layers: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.max_batch_size, 1);
        assert_eq!(config.max_seq_length, 4096);
        assert_eq!(config.vocab_size, 32000);
    }
}
