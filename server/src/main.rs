//! Castor - LLM inference server.
//!
//! Loads a tokenizer and an inference engine, then serves the HTTP API.
//! Tokenizer loading is permissive by default: a missing or unreadable
//! vocabulary degrades to a placeholder tokenizer and the server keeps
//! answering requests.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use castor_api::ApiConfig;
use castor_appstate::AppState;
use castor_engine::{InferenceBackend, StubEngine};
use castor_tokenization::{LoadPolicy, TokenizerHandle};

use crate::config::{CliArgs, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "castor_server=info,castor_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = ServerConfig::load(&args)?;

    info!("Starting Castor server v{}", env!("CARGO_PKG_VERSION"));
    info!("Model: {}", config.model.model_name);
    info!("Max batch: {}", config.model.max_batch_size);
    info!("Max sequence: {}", config.model.max_seq_length);
    info!("Vocab size: {}", config.model.vocab_size);
    info!("Port: {}", config.port);

    // Tokenizer
    let policy = if config.strict_loading {
        LoadPolicy::Strict
    } else {
        LoadPolicy::Permissive
    };
    let tokenizer = Arc::new(TokenizerHandle::with_policy(policy));
    let tag = tokenizer
        .load(&config.tokenizer_path)
        .with_context(|| format!("Failed to load tokenizer from {:?}", config.tokenizer_path))?;
    if tag.is_placeholder() {
        warn!(format = ?tag, "Tokenizer running in placeholder mode");
    } else {
        info!(format = ?tag, vocab_size = tokenizer.vocab_size(), "Tokenizer loaded");
    }

    // Engine
    let engine = StubEngine::new(config.model.clone());
    engine
        .initialize(&config.engine_path)
        .context("Failed to initialize inference engine")?;
    let engine_initialized = engine.is_initialized();

    // Shared state, injected into the API layer
    let state = Arc::new(AppState::new(
        tokenizer,
        Arc::new(engine) as Arc<dyn InferenceBackend>,
        config.model.clone(),
        engine_initialized,
        config.port,
        Duration::from_secs(config.infer_timeout_secs),
    ));

    castor_api::run_server(
        state,
        ApiConfig {
            port: config.port,
            ..Default::default()
        },
    )
    .await
}
