//! Configuration loading and management

use crate::core::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Messages attached to successful envelopes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub created: String,
    pub updated: String,
    pub deleted: String,
    /// Used by lookups and list queries
    pub success: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            created: "created".to_string(),
            updated: "updated".to_string(),
            deleted: "deleted".to_string(),
            success: crate::core::envelope::DEFAULT_MESSAGE.to_string(),
        }
    }
}

/// Configuration of a [`RecordService`](crate::core::service::RecordService)
///
/// # Example
/// ```yaml
/// cache: false
/// messages:
///   created: "新增成功"
///   deleted: "删除成功"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudConfig {
    /// Result-cache hint forwarded with every list query
    pub cache: bool,

    pub messages: Messages,
}

impl Default for CrudConfig {
    fn default() -> Self {
        Self {
            cache: true,
            messages: Messages::default(),
        }
    }
}

impl CrudConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Ok(config)
    }
}
