//! Configuration management for aiterm
//!
//! Tuning knobs for the terminal manager: how long a spawn may take, how long
//! a stopping process gets before it is killed, and what every child
//! environment receives. Values load from TOML (see [`loader`]) and fall back
//! to defaults.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::platform::PLATFORM_ENV_VAR;

pub use loader::ConfigLoader;

/// Main configuration structure for aiterm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Process lifecycle timing
    pub lifecycle: LifecycleConfig,

    /// Child environment defaults
    pub environment: EnvironmentConfig,
}

/// Process lifecycle timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Upper bound on process spawn, in milliseconds
    pub spawn_timeout_ms: u64,

    /// Time a process gets to exit after the termination request, in milliseconds
    pub stop_grace_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            spawn_timeout_ms: 5000,
            stop_grace_ms: 3000,
        }
    }
}

impl LifecycleConfig {
    pub fn spawn_timeout(&self) -> Duration {
        Duration::from_millis(self.spawn_timeout_ms)
    }

    pub fn stop_grace(&self) -> Duration {
        Duration::from_millis(self.stop_grace_ms)
    }
}

/// Child environment defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Variable carrying the platform tag ("unix" or "windows")
    pub platform_var: String,

    /// Variables given to every session; a session's own variables win
    pub defaults: HashMap<String, String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            platform_var: PLATFORM_ENV_VAR.to_string(),
            defaults: HashMap::new(),
        }
    }
}

impl Config {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.lifecycle.spawn_timeout_ms == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "lifecycle.spawn_timeout_ms".to_string(),
                reason: "Spawn timeout must be greater than 0".to_string(),
            });
        }

        if self.lifecycle.stop_grace_ms == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "lifecycle.stop_grace_ms".to_string(),
                reason: "Stop grace period must be greater than 0".to_string(),
            });
        }

        let var = self.environment.platform_var.trim();
        if var.is_empty() || var.contains('=') {
            return Err(Error::ConfigValidationFailed {
                field: "environment.platform_var".to_string(),
                reason: "Variable name must be non-empty and contain no '='".to_string(),
            });
        }

        if let Some(key) = self.environment.defaults.keys().find(|k| k.is_empty() || k.contains('=')) {
            return Err(Error::ConfigValidationFailed {
                field: "environment.defaults".to_string(),
                reason: format!("Invalid variable name '{}'", key),
            });
        }

        Ok(())
    }
}
