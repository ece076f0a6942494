//! Error types for phoneme-viewer.

use phoneme_features::PhonemeError;
use thiserror::Error;

/// Result type alias for phoneme-viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors that can occur in phoneme-viewer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ViewerError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid configuration file.
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Phoneme table or query error.
    #[error(transparent)]
    Phoneme(#[from] PhonemeError),

    /// Report serialization error.
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
