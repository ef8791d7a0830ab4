//! Castor server binary support.
//!
//! The binary wires the tokenizer, engine, and HTTP API together; the
//! request semantics live in `castor-appstate`, not here.

pub mod config;

pub use config::{CliArgs, ServerConfig};
