//! Merge configuration, loadable from YAML

use crate::error::MergeResult;
use crate::record::FieldNames;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How merged groups are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Numbered listing, one indented record per line
    #[default]
    Text,
    /// JSON array of `{key, records}` objects
    Json,
}

/// Configuration for a merge run
///
/// ```yaml
/// fields:
///   phone: mobile
///   email: mail
/// format: json
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// JSON keys holding the identifying fields
    pub fields: FieldNames,
    /// Output rendering
    pub format: OutputFormat,
}

impl MergeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document; missing keys take their defaults
    pub fn from_yaml_str(yaml: &str) -> MergeResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> MergeResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn with_fields(mut self, fields: FieldNames) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
