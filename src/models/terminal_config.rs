//! Terminal launch configuration supplied by callers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::TerminalType;

/// Everything needed to launch one terminal session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Which AI CLI to launch
    pub terminal_type: TerminalType,

    /// Unique session name
    pub name: String,

    /// Working directory for the process (inherits ours when unset)
    pub working_dir: Option<PathBuf>,

    /// Extra environment variables, overriding inherited ones
    pub environment: HashMap<String, String>,

    /// Arguments appended after the tool's own arguments
    pub args: Vec<String>,

    /// Append the tool's confirmation-bypass flag
    pub yolo_mode: bool,

    /// Program to run for `Custom` terminals; the platform shell when unset
    pub command: Option<String>,
}

impl TerminalConfig {
    /// Create a config for the given type and name
    pub fn new(terminal_type: TerminalType, name: impl Into<String>) -> Self {
        Self {
            terminal_type,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Append extra arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Enable or disable YOLO mode
    pub fn with_yolo_mode(mut self, enabled: bool) -> Self {
        self.yolo_mode = enabled;
        self
    }

    /// Program to run for a `Custom` terminal
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}
