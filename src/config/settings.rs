use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::models::SourceName;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VetConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Budget for each source check before it is reported as TIMEOUT
    pub timeout_secs: u64,
    /// Per-source budget overrides
    #[serde(default)]
    pub overrides: BTreeMap<SourceName, u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Overall deadline for a whole validation; unset means wait for all sources
    pub deadline_secs: Option<u64>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 90,
            overrides: BTreeMap::new(),
        }
    }
}

impl VetConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: VetConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if file doesn't exist
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) if p.exists() => Self::from_file(p),
            _ => Ok(Self::default()),
        }
    }

    /// `$XDG_CONFIG_HOME/corp-vet/config.yaml` (or platform equivalent)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("corp-vet").join("config.yaml"))
    }
}
