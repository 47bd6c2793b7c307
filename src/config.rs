//! Pipeline configuration.
//!
//! A configuration is a small JSON document. Every key is optional:
//!
//! ```json
//! {
//!   "delimiter": ",",
//!   "has_header": true,
//!   "on_error": "skip",
//!   "validation_rules": "age TYPE INT AND age RANGE (18,65)",
//!   "transformation_rules": "name REQUIRED"
//! }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Column delimiter
    pub delimiter: char,

    /// Whether the first line names the columns
    pub has_header: bool,

    /// What to do with a record that fails validation
    pub on_error: ErrorPolicy,

    /// Rules every record must pass
    pub validation_rules: Option<String>,

    /// Rules applied, in order, to every valid record
    pub transformation_rules: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            delimiter: ',',
            has_header: true,
            on_error: ErrorPolicy::default(),
            validation_rules: None,
            transformation_rules: None,
        }
    }
}

impl PipelineConfig {
    /// Reads a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// Handling of records that fail validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the run at the first invalid record
    #[default]
    Abort,
    /// Drop the record, note it in the report, and carry on
    Skip,
}

#[test]
fn test_defaults_fill_missing_keys() {
    let config = PipelineConfig::from_json(r#"{ "on_error": "skip" }"#).unwrap();
    assert_eq!(config.delimiter, ',');
    assert!(config.has_header);
    assert_eq!(config.on_error, ErrorPolicy::Skip);
    assert_eq!(config.validation_rules, None);
}

#[test]
fn test_unknown_policy_is_rejected() {
    assert!(PipelineConfig::from_json(r#"{ "on_error": "retry" }"#).is_err());
}
