//! Terminal Status Model
//!
//! Lifecycle states of a terminal session and the transitions allowed
//! between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the state of a terminal session
///
/// ```text
/// Stopped -> Starting -> Running -> Stopping -> Stopped
///            Starting -> Error
///                                   Stopping -> Error
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TerminalStatus {
    /// No process attached
    #[default]
    Stopped,
    /// Process is being spawned
    Starting,
    /// Process is alive and accepting input
    Running,
    /// Termination has been requested
    Stopping,
    /// Spawn or kill failed; the session cannot be reused
    Error,
}

impl TerminalStatus {
    /// Get a string representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalStatus::Stopped => "stopped",
            TerminalStatus::Starting => "starting",
            TerminalStatus::Running => "running",
            TerminalStatus::Stopping => "stopping",
            TerminalStatus::Error => "error",
        }
    }

    /// Whether the state machine permits moving from `self` to `next`
    pub fn can_transition_to(&self, next: TerminalStatus) -> bool {
        use TerminalStatus::*;
        matches!(
            (self, next),
            (Stopped, Starting)
                | (Starting, Running)
                | (Starting, Error)
                | (Running, Stopping)
                | (Stopping, Stopped)
                | (Stopping, Error)
        )
    }

    /// Check if the session is currently running
    pub fn is_running(&self) -> bool {
        matches!(self, TerminalStatus::Running)
    }

    /// `Error` has no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, TerminalStatus::Error)
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
