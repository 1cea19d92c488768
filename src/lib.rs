//! aiterm - Process lifecycle manager for AI command-line tools
//!
//! Runs AI coding assistants (Claude Code, Gemini CLI, Cursor, Aider, Codex or
//! any custom command) as named terminal sessions: one child process per
//! session, driven through its stdin and stdout pipes.
//!
//! ## Module Organization
//!
//! - [`terminal`] - Session registry and lifecycle manager
//! - [`platform`] - OS strategies: executable lookup, environment, kill, process inspection
//! - [`models`] - Terminal types, statuses, launch configuration
//! - [`config`] - Manager configuration and TOML loading
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use aiterm::{TerminalConfig, TerminalManager, TerminalType};
//! use std::time::Duration;
//!
//! # async fn example() -> aiterm::Result<()> {
//! let manager = TerminalManager::new();
//! manager
//!     .start_terminal(TerminalConfig::new(TerminalType::Custom, "shell"))
//!     .await?;
//!
//! manager.send_command("shell", "echo hello").await?;
//! let line = manager.read_output("shell", Some(Duration::from_secs(5))).await?;
//! assert_eq!(line.as_deref(), Some("hello"));
//!
//! manager.stop_terminal("shell").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Session Lifecycle
//!
//! ```text
//! Stopped -> Starting -> Running -> Stopping -> Stopped
//!            Starting -> Error       Stopping -> Error
//! ```
//!
//! Names are unique within a manager. A stopped session stays listed until it
//! is removed; a session that failed to start is dropped immediately.

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod terminal;

// Re-exports for core functionality
pub use config::{Config, ConfigLoader};
pub use error::{Error, Result};
pub use models::{ProcessInfo, TerminalConfig, TerminalStatus, TerminalType};
pub use platform::{PlatformAdapter, PlatformStrategy};
pub use terminal::{Session, TerminalManager, TerminalSnapshot};

/// The current version of aiterm from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build a manager from the configuration in the default locations
///
/// A missing configuration file means defaults; a broken one is an error.
pub fn init() -> Result<TerminalManager> {
    info!("Initializing {} v{}", NAME, VERSION);
    let config = ConfigLoader::load()?;
    Ok(TerminalManager::with_config(config))
}

/// Build a manager from a specific configuration file
pub fn init_with_config(config_path: &std::path::Path) -> Result<TerminalManager> {
    info!(
        "Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    if !config_path.exists() {
        return Err(Error::ConfigLoadFailed {
            path: config_path.to_path_buf(),
            reason: "Configuration file does not exist".to_string(),
        });
    }

    let config = ConfigLoader::load_from_file(config_path)?;
    Ok(TerminalManager::with_config(config))
}

/// Turn a startup error into a message with remediation hints
pub fn handle_startup_error(error: &Error) -> String {
    match error {
        Error::ConfigLoadFailed { path, reason } => format!(
            "Configuration Error: Failed to load config from '{}': {}\n\nTry:\n• Check file permissions\n• Unset ${} to use the default locations",
            path.display(),
            reason,
            config::loader::CONFIG_ENV_VAR
        ),
        Error::ConfigParseFailed { format, reason } => format!(
            "Configuration Error: Failed to parse {} config: {}\n\nTry:\n• Check configuration file syntax",
            format, reason
        ),
        Error::ConfigValidationFailed { field, reason } => format!(
            "Configuration Error: Validation failed for '{}': {}",
            field, reason
        ),
        Error::SpawnFailure { command, .. } => format!(
            "{}\n\nTry:\n• Check that '{}' is installed and on PATH",
            error, command
        ),
        _ => error.to_string(),
    }
}
