//! Loader configuration.
//!
//! [`LoaderConfig`] carries the settings shared by every [`ProgramBuilder`](crate::ProgramBuilder)
//! of a process, most importantly the base path used when a builder is not given one. It is
//! read from `loader.json` in the user's configuration directory when present.

use std::path::PathBuf;

use log::LevelFilter;
use serde::Deserialize;

/// Base path used when neither the builder nor the configuration names one.
pub const DEFAULT_SHADER_PATH: &str = "shaders/";

const CONFIG_DIR_NAME: &str = "mp3d-shaderkit";
const CONFIG_FILE_NAME: &str = "loader.json";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings shared by all program builders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Base path of the shader tree, used when a builder is constructed without one.
    pub default_path: String,
    /// Maximum level the inspector binary logs at.
    pub log_level: LevelFilter,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_path: DEFAULT_SHADER_PATH.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl LoaderConfig {
    /// Parses a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Location of the user's configuration file, if the platform has a config directory.
    pub fn config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the user's configuration file, or the defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_file() {
            Some(path) if path.is_file() => {
                let contents = std::fs::read_to_string(&path)?;
                log::debug!("Loaded loader configuration from {}", path.display());
                Self::from_json(&contents)
            }
            _ => Ok(Self::default()),
        }
    }
}
