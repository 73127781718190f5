//! Core error types for observe

pub mod taxonomy;

use thiserror::Error;
pub use taxonomy::{ClassificationError, TaxonomyError};

/// Main error type for observe operations
#[derive(Error, Debug)]
pub enum ObserveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for observe operations
pub type ObserveResult<T> = Result<T, ObserveError>;

// Conversion implementations for common error types
impl From<serde_json::Error> for ObserveError {
    fn from(err: serde_json::Error) -> Self {
        ObserveError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for ObserveError {
    fn from(err: anyhow::Error) -> Self {
        ObserveError::Other(err.to_string())
    }
}
