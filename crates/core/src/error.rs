use std::io;

/// Errors that can occur during kospec operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown spec style: {0}")]
    UnknownStyle(String),

    #[error("No test found at the specified location")]
    NoTestFound,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for kospec operations
pub type Result<T> = std::result::Result<T, Error>;
