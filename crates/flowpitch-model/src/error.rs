//! Error types for content decoding

use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while decoding a content document
#[derive(Error, Debug)]
pub enum ModelError {
    /// The document is not valid JSON, or does not have the deck shape
    #[error("Malformed content document: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Line of the offending input, when known
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Json(e) if e.line() > 0 => Some(e.line()),
            Self::Json(_) => None,
        }
    }
}
