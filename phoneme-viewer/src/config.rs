//! Configuration parsing and validation.

use std::path::{Path, PathBuf};

use phoneme_features::{MatchConfig, PhonemeTable};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

/// Viewer configuration, usually loaded from a YAML file.
///
/// Without `table`, the IPA table bundled with `phoneme-features` is used.
///
/// ```yaml
/// table: data/phonemes.json
/// prompt: "> "
/// matching:
///   threshold: 0.7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Path of the JSON phoneme table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,

    /// Prompt printed before each interactive query.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Partial-equality settings used by `compare`.
    #[serde(default)]
    pub matching: MatchConfig,
}

fn default_prompt() -> String {
    "> ".into()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            table: None,
            prompt: default_prompt(),
            matching: MatchConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or a parse error for
    /// malformed YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an IO or serialization error.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override the table path.
    #[must_use]
    pub fn with_table(mut self, table: PathBuf) -> Self {
        self.table = Some(table);
        self
    }

    /// Load the configured table, or the bundled one if none is set.
    ///
    /// # Errors
    ///
    /// Returns the table's IO or parse error.
    pub fn load_table(&self) -> Result<PhonemeTable> {
        let table = match &self.table {
            Some(path) => PhonemeTable::from_file(path)?,
            None => PhonemeTable::bundled()?,
        };
        Ok(table)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::Config` for an empty table path, or the
    /// matching configuration's own validation error.
    pub fn validate(&self) -> Result<()> {
        if self.table.as_ref().is_some_and(|path| path.as_os_str().is_empty()) {
            return Err(ViewerError::Config("table is required".into()));
        }
        self.matching.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.table, None);
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.matching.threshold, 0.7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: ViewerConfig = serde_yaml::from_str("prompt: \"? \"\n").unwrap();
        assert_eq!(config.prompt, "? ");
        assert_eq!(config.table, None);
        assert_eq!(config.matching, MatchConfig::default());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("viewer.yaml");
        let config = ViewerConfig::default().with_table(PathBuf::from("ipa.json"));

        config.to_file(&path).unwrap();
        let loaded = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let config: ViewerConfig = serde_yaml::from_str("matching:\n  threshold: 2.0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ViewerError::Phoneme(phoneme_features::PhonemeError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_default_table_is_bundled() {
        let table = ViewerConfig::default().load_table().unwrap();
        assert_eq!(table.len(), 23);
        assert!(table.contains("ŋ"));
    }

    #[test]
    fn test_default_config_omits_table() {
        let yaml = serde_yaml::to_string(&ViewerConfig::default()).unwrap();
        assert!(!yaml.contains("table"));
    }

    #[test]
    fn test_missing_table_file_is_io_error() {
        let config = ViewerConfig::default().with_table(PathBuf::from("/nonexistent/ipa.json"));
        assert!(matches!(
            config.load_table(),
            Err(ViewerError::Phoneme(phoneme_features::PhonemeError::Io(_)))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let config = ViewerConfig::default().with_table(PathBuf::new());
        assert!(matches!(config.validate(), Err(ViewerError::Config(_))));
    }
}
