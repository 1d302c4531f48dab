use std::env;
use std::fs;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
pub const BASE_URL_ENV: &str = "ROI_SIM_BASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Where the simulation service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_yaml_file(filepath: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(filepath)?;
        Self::from_yaml_str(&contents)
    }

    /// Resolves the effective config: file (or defaults), then the
    /// environment, then an explicit base URL.
    pub fn load(config_path: Option<&str>, base_url: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(env::var(BASE_URL_ENV).ok().as_deref(), base_url);
        Ok(config)
    }

    fn apply_overrides(&mut self, env_base_url: Option<&str>, flag_base_url: Option<&str>) {
        if let Some(url) = flag_base_url.or(env_base_url).filter(|url| !url.is_empty()) {
            self.base_url = url.to_string();
        }
    }
}
