//! # Lint Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! strict: false
//! allowed_os: [linux, windows]
//! disabled_rules: ["27", "30"]
//! ```
//!
//! Every field has a default and unknown fields are rejected. Rule ids may
//! be written as strings or bare integers.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use yamlvalid_lint::{WorkloadOptions, DEFAULT_ALLOWED_OS};

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid configuration document.
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying YAML failure.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Settings read from a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Exit with a non-zero status when any diagnostic is reported.
    pub strict: bool,
    /// Values accepted for `spec.os`.
    pub allowed_os: Vec<String>,
    /// Rule ids to skip.
    #[serde(deserialize_with = "rule_ids")]
    pub disabled_rules: BTreeSet<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            strict: false,
            allowed_os: DEFAULT_ALLOWED_OS.iter().map(|s| s.to_string()).collect(),
            disabled_rules: BTreeSet::new(),
        }
    }
}

impl LintConfig {
    /// Load configuration from a YAML file.
    ///
    /// An empty file yields the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not a valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the text is malformed, has unknown
    /// fields, or has fields of the wrong type.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value)
    }

    /// Checklist options derived from this configuration.
    pub fn workload_options(&self) -> WorkloadOptions {
        WorkloadOptions {
            allowed_os: self.allowed_os.clone(),
            disabled_rules: self.disabled_rules.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleId {
    Text(String),
    Number(i64),
}

fn rule_ids<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Vec::<RuleId>::deserialize(deserializer)?;
    Ok(ids
        .into_iter()
        .map(|id| match id {
            RuleId::Text(s) => s,
            RuleId::Number(n) => n.to_string(),
        })
        .collect())
}
