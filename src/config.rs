//! YAML configuration for seeding a pattern store.
//!
//! A config file names the notation separators, the default list mode, and
//! a set of patterns to register at startup.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "routing table"
//!
//! notation:
//!   pair_separator: ","
//!   value_separator: ":"
//!
//! list:
//!   exact: false
//!
//! patterns:
//!   - pattern: "role:web"
//!     data: "web-pool"
//!   - pattern: "role:web, zone:eu"
//!     data: "web-pool-eu"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use matcher::{PatternRecord, PatternStore};

use crate::notation::{NotationConfig, NotationError};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("pattern {index}: {source}")]
    Pattern {
        index: usize,
        #[source]
        source: NotationError,
    },
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PropmatchConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub notation: NotationConfig,

    #[serde(default)]
    pub list: ListYamlConfig,

    /// Patterns registered by [`PropmatchConfig::build_store`], in order.
    #[serde(default)]
    pub patterns: Vec<PatternYamlEntry>,
}

impl PropmatchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PropmatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if let Err(err) = self.notation.validate() {
            return Err(ConfigLoadError::Validation(format!("notation: {err}")));
        }

        for (index, entry) in self.patterns.iter().enumerate() {
            self.notation
                .parse_strict(&entry.pattern)
                .map_err(|source| ConfigLoadError::Pattern { index, source })?;
        }

        Ok(())
    }

    /// A store holding every configured pattern. Later entries with the same
    /// pattern replace earlier ones.
    pub fn build_store(&self) -> Result<PatternStore<String>, ConfigLoadError> {
        let mut store = PatternStore::new();
        for (index, entry) in self.patterns.iter().enumerate() {
            let properties = self
                .notation
                .parse_strict(&entry.pattern)
                .map_err(|source| ConfigLoadError::Pattern { index, source })?;
            store.add(properties, entry.data.clone());
        }
        debug!(
            config = self.name.as_deref().unwrap_or("unnamed"),
            patterns = store.pattern_count(),
            "store_built"
        );
        Ok(store)
    }

    /// List `store` with constraints written in this config's notation,
    /// using the configured default for exact matching.
    pub fn list<T: Clone>(
        &self,
        store: &PatternStore<T>,
        constraints: &str,
    ) -> Vec<PatternRecord<T>> {
        let constraints = self.notation.parse(constraints);
        store.list(Some(&constraints), self.list.exact)
    }
}

impl Default for PropmatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            notation: NotationConfig::default(),
            list: ListYamlConfig::default(),
            patterns: Vec::new(),
        }
    }
}

/// List defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListYamlConfig {
    #[serde(default)]
    pub exact: bool,
}

/// One pattern to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternYamlEntry {
    pub pattern: String,
    pub data: String,
}
