//! Agent configuration loaded from `config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tether_common::capability::StorageCapability;
use tether_common::paths;
use tether_common::types::SecurityProfile;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config.toml at {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Authentication mechanism used for onboarding and request proofs.
    pub security_profile: SecurityProfile,
    /// Registration file; relative paths resolve against the data directory.
    pub credentials_path: Option<PathBuf>,
    /// Audience claim for client assertions.
    pub token_audience: Option<String>,
    /// Client assertion lifetime in seconds.
    pub assertion_lifetime_secs: u64,
    pub storage: StorageCapability,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            security_profile: SecurityProfile::default(),
            credentials_path: None,
            token_audience: None,
            assertion_lifetime_secs: 300,
            storage: StorageCapability::default(),
        }
    }
}

impl AgentConfig {
    /// Load from the default `config.toml`. Missing file ⇒ defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&paths::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config.toml, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Absolute path of the registration file.
    pub fn resolved_credentials_path(&self) -> PathBuf {
        match &self.credentials_path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => paths::tether_data_dir().join(p),
            None => paths::credentials_path(),
        }
    }
}
