use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Engine is already initialized")]
    AlreadyInitialized,

    #[error("Engine is not initialized")]
    NotInitialized,

    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}
