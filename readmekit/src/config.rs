//! Project configuration from readmekit.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::export::DEFAULT_FILE_NAME;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "readmekit.toml";

/// Project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Where the composed README is written
    pub output: PathBuf,

    /// Optional custom catalog file, replacing the built-in templates
    pub catalog: Option<PathBuf>,

    /// Start from an empty document instead of the default sections
    pub clean_start: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_FILE_NAME),
            catalog: None,
            clean_start: false,
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a readmekit.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ProjectConfig)` - Successfully loaded configuration
    /// * `Err(ConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::IoError)?;

        let config: ProjectConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        Ok(config)
    }

    /// Load configuration if the file exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            log::debug!(
                "No {} found, using default configuration",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to a readmekit.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the configuration will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(ConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        fs::write(&path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }
}

/// Errors that can occur when loading or saving project configuration
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),

    #[error("TOML parse error: {0}")]
    ParseError(toml::de::Error),

    #[error("TOML serialize error: {0}")]
    SerializeError(toml::ser::Error),
}
