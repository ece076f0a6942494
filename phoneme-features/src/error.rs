//! Error types for phoneme-features.

use thiserror::Error;

/// Result type alias for phoneme-features operations.
pub type Result<T> = std::result::Result<T, PhonemeError>;

/// Errors that can occur while loading or comparing phonemes.
#[derive(Debug, Error)]
pub enum PhonemeError {
    /// A raw feature value is not one of `true`, `false`, `0` or `"±"`.
    #[error("feature '{feature}': value {value} is not recognised (expected true, false, 0 or \"±\")")]
    Parse {
        /// Feature whose value failed to parse.
        feature: String,
        /// The offending raw value, rendered as JSON.
        value: String,
    },

    /// The same feature name appeared twice in one raw record.
    #[error("feature '{0}' is specified more than once")]
    DuplicateFeature(String),

    /// The same symbol was given to two source phonemes.
    #[error("symbol '{0}' is defined more than once")]
    DuplicateSymbol(String),

    /// A symbol was looked up that the table does not contain.
    #[error("'{0}' is not in the database")]
    SymbolNotFound(String),

    /// Two feature vectors cannot be compared feature by feature.
    #[error("feature mismatch: '{0}' is not present in both vectors")]
    FeatureMismatch(String),

    /// Empty input where non-empty was required.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Invalid configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error while reading a table.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON table.
    #[error("invalid phoneme table: {0}")]
    Json(#[from] serde_json::Error),
}
