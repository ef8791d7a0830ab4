//! API configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,

    /// Enable Cross-Origin Resource Sharing (CORS).
    pub enable_cors: bool,

    /// Allowed origins for CORS requests. `["*"]` allows all origins.
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 8080);
        assert!(config.enable_cors);
    }
}
