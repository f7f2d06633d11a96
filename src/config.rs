//! Paginator configuration
//!
//! Settings shared by every request a [`Paginator`](crate::paginate::Paginator)
//! serves. Loaded from YAML or JSON, or built in code.

use crate::error::{Error, Result, ResultExt};
use crate::types::{Collation, ID_FIELD};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a paginator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Unique identifier field, used as the tie-breaker
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Upper bound on a request's page size (larger requests are clamped)
    #[serde(default)]
    pub max_page_size: Option<usize>,

    /// Collation used when a request doesn't set one
    #[serde(default)]
    pub collation: Option<Collation>,
}

fn default_id_field() -> String {
    ID_FIELD.to_string()
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            id_field: default_id_field(),
            max_page_size: None,
            collation: None,
        }
    }
}

impl PagerConfig {
    /// Create a default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier field
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Set the maximum page size
    pub fn with_max_page_size(mut self, max: usize) -> Self {
        self.max_page_size = Some(max);
        self
    }

    /// Set the default collation
    pub fn with_collation(mut self, collation: Collation) -> Self {
        self.collation = Some(collation);
        self
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        if self.id_field.is_empty() {
            return Err(Error::invalid_config_value("id_field", "must not be empty"));
        }
        if self.max_page_size == Some(0) {
            return Err(Error::invalid_config_value(
                "max_page_size",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
