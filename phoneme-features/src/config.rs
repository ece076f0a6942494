//! Configuration for phoneme matching.

use serde::{Deserialize, Serialize};

use crate::error::{PhonemeError, Result};
use crate::phoneme::Phoneme;
use crate::similarity::{partial_equals, DEFAULT_THRESHOLD};

/// Settings for threshold-based phoneme matching.
///
/// # Example
///
/// ```
/// use phoneme_features::MatchConfig;
///
/// let config = MatchConfig::default().with_threshold(0.8);
/// assert!(config.validate().is_ok());
/// assert!(MatchConfig::default().with_threshold(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Minimum similarity (0.0 to 1.0) for two phonemes to count as
    /// partially equal.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MatchConfig {
    /// Set the partial-equality threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PhonemeError::InvalidConfig` if the threshold is not a number
    /// in [0, 1].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PhonemeError::InvalidConfig(format!(
                "threshold must be in [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Check if two phonemes match under this configuration.
    ///
    /// # Errors
    ///
    /// Propagates similarity errors.
    pub fn matches(&self, a: &Phoneme, b: &Phoneme) -> Result<bool> {
        partial_equals(a, b, self.threshold)
    }
}
