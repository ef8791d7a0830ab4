//! Configuration for the Castor server.
//!
//! Priority: CLI arguments > environment variables > TOML config file >
//! defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use castor_engine::ModelConfig;

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "castor-server")]
#[command(about = "Castor - LLM inference server with HTTP API")]
#[command(version)]
pub struct CliArgs {
    /// HTTP port for the API server (default: 8080)
    #[arg(long, short = 'p', env = "CASTOR_PORT")]
    pub port: Option<u16>,

    /// Tokenizer definition file (default: models/tokenizer.json)
    #[arg(long, short = 't', env = "CASTOR_TOKENIZER")]
    pub tokenizer: Option<PathBuf>,

    /// Serialized engine plan file (default: models/llama-2-7b.plan)
    #[arg(long, short = 'e', env = "CASTOR_ENGINE")]
    pub engine: Option<PathBuf>,

    /// Model name reported by /health and /model
    #[arg(long, env = "CASTOR_MODEL_NAME")]
    pub model_name: Option<String>,

    /// Fail startup on tokenizer read/parse errors instead of degrading
    /// to a placeholder vocabulary
    #[arg(long, env = "CASTOR_STRICT_LOADING")]
    pub strict_loading: bool,

    /// Timeout for a single inference call, in seconds (default: 30)
    #[arg(long, env = "CASTOR_INFER_TIMEOUT")]
    pub infer_timeout_secs: Option<u64>,

    /// Configuration file path
    #[arg(long, short = 'c', default_value = "castor.toml", env = "CASTOR_CONFIG")]
    pub config: PathBuf,
}

/// Full server configuration (merged from all sources).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port
    pub port: u16,

    /// Tokenizer definition file
    pub tokenizer_path: PathBuf,

    /// Engine plan file
    pub engine_path: PathBuf,

    /// Strict tokenizer loading (default: permissive)
    pub strict_loading: bool,

    /// Per-call inference timeout, seconds
    pub infer_timeout_secs: u64,

    /// Model parameters
    pub model: ModelConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            tokenizer_path: PathBuf::from("models/tokenizer.json"),
            engine_path: PathBuf::from("models/llama-2-7b.plan"),
            strict_loading: false,
            infer_timeout_secs: 30,
            model: ModelConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the config file (when present) and apply
    /// CLI overrides on top.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let mut config = if args.config.exists() {
            Self::from_file(&args.config)
                .with_context(|| format!("Failed to load config from {:?}", args.config))?
        } else {
            Self::default()
        };

        // CLI/env values override the file only when actually given;
        // absent args leave the file (or default) value in place.
        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(ref tokenizer) = args.tokenizer {
            config.tokenizer_path = tokenizer.clone();
        }
        if let Some(ref engine) = args.engine {
            config.engine_path = engine.clone();
        }
        config.strict_loading = config.strict_loading || args.strict_loading;
        if let Some(secs) = args.infer_timeout_secs {
            config.infer_timeout_secs = secs;
        }
        if let Some(ref name) = args.model_name {
            config.model.model_name = name.clone();
        }

        Ok(config)
    }

    fn from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: ServerConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }
}
