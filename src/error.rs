//! Error types and Result aliases for aiterm

use std::path::PathBuf;
use std::time::Duration;

use crate::models::TerminalStatus;

/// Result type alias for aiterm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for aiterm
///
/// Every variant carries enough context (session name, command, reason) to be
/// shown to a user directly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === Registry errors ===
    /// A session with this name is already registered
    #[error("terminal '{name}' already exists")]
    AlreadyExists { name: String },

    /// No session with this name is registered
    #[error("terminal '{name}' not found")]
    NotFound { name: String },

    /// The session exists but is not in the Running state
    #[error("terminal '{name}' is not running (status: {status})")]
    NotRunning { name: String, status: TerminalStatus },

    /// A status change that the session state machine forbids
    #[error("terminal '{name}' cannot move from {from} to {to}")]
    InvalidTransition {
        name: String,
        from: TerminalStatus,
        to: TerminalStatus,
    },

    /// The manager has been shut down and accepts no new sessions
    #[error("terminal manager is shut down")]
    ShutDown,

    // === Launch errors ===
    /// The terminal type has no command that can be launched
    #[error("unsupported terminal type '{terminal_type}': {reason}")]
    UnsupportedType {
        terminal_type: String,
        reason: String,
    },

    /// The caller-supplied configuration is unusable
    #[error("invalid terminal configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Spawning did not complete within the configured timeout
    #[error("timeout starting terminal '{name}' ({command}) after {timeout:?}")]
    SpawnTimeout {
        name: String,
        command: String,
        timeout: Duration,
    },

    /// The OS refused to create the process
    #[error("failed to start terminal '{name}' ({command}): {reason}")]
    SpawnFailure {
        name: String,
        command: String,
        reason: String,
    },

    // === I/O errors ===
    /// Attaching, reading or writing a stdio pipe failed
    #[error("pipe failure on terminal '{name}': {reason}")]
    PipeFailure { name: String, reason: String },

    /// The process could not be terminated, even forcibly
    #[error("failed to kill process {pid}: {reason}")]
    KillFailure { pid: u32, reason: String },

    // === Configuration errors ===
    /// Failed to read the manager configuration file
    #[error("failed to load config from '{}': {reason}", path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// The manager configuration file is malformed
    #[error("failed to parse {format} config: {reason}")]
    ConfigParseFailed { format: String, reason: String },

    /// A configuration value is out of range
    #[error("configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    /// Failed to serialize configuration
    #[error("failed to serialize config as {format}: {reason}")]
    ConfigSerializationFailed { format: String, reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a `NotFound` error for a session name
    pub fn not_found(name: &str) -> Self {
        Error::NotFound {
            name: name.to_string(),
        }
    }

    /// Build a `PipeFailure` error from any displayable cause
    pub fn pipe(name: &str, reason: impl std::fmt::Display) -> Self {
        Error::PipeFailure {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error means the session is missing rather than misbehaving
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
