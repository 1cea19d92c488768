//! Configuration File Loading
//!
//! Finds the manager configuration file, parses it and validates the result.
//! A missing file is not an error: defaults apply.

use super::Config;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "AITERM_CONFIG";

/// Configuration file loader
pub struct ConfigLoader {
    /// Candidate configuration files, highest priority first
    search_paths: Vec<PathBuf>,
    /// File the configuration was loaded from, if any
    current_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader over the default search paths
    pub fn new() -> Self {
        Self::with_search_paths(Self::get_search_paths())
    }

    /// Create a loader over explicit candidate files
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            current_path: None,
        }
    }

    /// Load configuration from the default locations, falling back to defaults
    pub fn load() -> Result<Config> {
        let mut loader = Self::new();
        loader.load_or_default()
    }

    /// Load the first existing candidate, or defaults when none exist
    ///
    /// A file that exists but fails to parse or validate is an error; it is
    /// never silently replaced by defaults.
    pub fn load_or_default(&mut self) -> Result<Config> {
        let found = self.search_paths.iter().find(|p| p.is_file()).cloned();

        match found {
            Some(path) => {
                let config = Self::load_from_file(&path)?;
                info!("Loaded configuration from {}", path.display());
                self.current_path = Some(path);
                Ok(config)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load and validate a specific configuration file
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
            format: "TOML".to_string(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(config).map_err(|e| Error::ConfigSerializationFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            })?;

        fs::write(path, content)?;
        Ok(())
    }

    /// File the last successful load read from
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// Candidate files, highest priority first
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Get default search paths for configuration files
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(explicit) = env::var_os(CONFIG_ENV_VAR) {
            paths.push(PathBuf::from(explicit));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("aiterm").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".aiterm.toml"));
        }

        paths
    }

    /// Get the default configuration path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aiterm")
            .join("config.toml")
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
