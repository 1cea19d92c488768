//! OS-neutral command descriptors
//!
//! The adapter produces a `CommandSpec`; it only becomes a real process
//! command at spawn time, which keeps command construction testable.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Fully resolved description of a process to launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// Resolved executable path (or bare name for spawn-time resolution)
    pub program: PathBuf,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Working directory, when not inherited
    pub working_dir: Option<PathBuf>,
    /// Variables set on top of the inherited environment
    pub env: Option<BTreeMap<String, String>>,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: None,
        }
    }

    /// The argv a process listing would show: program followed by arguments
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Build a command with piped stdin/stdout, ready to spawn
    ///
    /// Stderr is discarded. The child is killed if its handle is dropped.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        if let Some(env) = &self.env {
            cmd.envs(env);
        }

        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}
