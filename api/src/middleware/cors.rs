//! CORS middleware configuration.

use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;

/// Create a CORS layer from configuration.
pub fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if !config.enable_cors {
        return CorsLayer::new();
    }

    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
