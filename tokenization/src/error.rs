use thiserror::Error;

pub type Result<T> = std::result::Result<T, TokenizationError>;

#[derive(Error, Debug)]
pub enum TokenizationError {
    #[error("Tokenizer file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse tokenizer file: {0}")]
    ParseError(String),

    #[error("Vocabulary is empty: {0}")]
    EmptyVocabulary(String),

    #[error("Unsupported tokenizer format: {0}")]
    UnsupportedFormat(String),

    #[error("Tokenizer is already loaded")]
    AlreadyLoaded,
}
