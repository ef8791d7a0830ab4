//! Router configuration and setup.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

use castor_appstate::AppState;

use crate::{config::ApiConfig, middleware, routes};

/// Configure routes and middleware.
///
/// Layer order matters: routes first, then trace and CORS layers, state
/// applied last (axum 0.8 pattern).
pub fn configure_routes(state: Arc<AppState>, config: &ApiConfig) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/model", get(routes::model::model))
        .route("/infer", post(routes::infer::infer))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(middleware::cors_layer(config))
        .with_state(state)
}
