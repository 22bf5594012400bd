pub mod defaults;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::firewall::FirewallMode;
use defaults::{
    CONFIG_DIR_NAME, CONFIG_FILENAME, DEFAULT_MAX_CONTEXT_LENGTH, DEFAULT_MAX_TEXT_LENGTH,
    DEFAULT_PORT,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory of frontend assets to serve at the root, if any.
    pub static_dir: Option<PathBuf>,
    pub firewall: FirewallConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallConfig {
    /// Mode applied when a request does not specify one.
    pub default_mode: FirewallMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_text_length: usize,
    pub max_context_length: usize,
}

impl ServerConfig {
    /// Load configuration from a TOML file, or fall back to defaults when no
    /// path is given.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = if let Some(path) = config_path {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&config_str)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        Ok(config)
    }

    /// Conventional per-user config location, probed when no explicit path
    /// is supplied on the command line.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow::anyhow!("Server port must be greater than 0"));
        }

        if self.limits.max_text_length == 0 {
            return Err(anyhow::anyhow!("Max text length must be greater than 0"));
        }

        if self.limits.max_context_length == 0 {
            return Err(anyhow::anyhow!("Max context length must be greater than 0"));
        }

        if let Some(dir) = &self.static_dir {
            if !dir.is_dir() {
                return Err(anyhow::anyhow!(
                    "Static directory does not exist: {}",
                    dir.display()
                ));
            }
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: None,
            firewall: FirewallConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            default_mode: FirewallMode::Balanced,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            max_context_length: DEFAULT_MAX_CONTEXT_LENGTH,
        }
    }
}
