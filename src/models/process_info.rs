//! Read-only process snapshots produced by the platform layer

use serde::{Deserialize, Serialize};

/// Placeholder used when a field cannot be determined
pub const UNKNOWN: &str = "unknown";

/// Cross-platform process information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// OS process identifier
    pub pid: u32,
    /// Short command name (`comm` on Unix, image name on Windows)
    pub command: String,
    /// Full command line, arguments separated by spaces
    pub command_line: String,
    /// Path of the executable image
    pub executable_path: String,
    /// Descriptive status ("running" or "exited")
    pub status: String,
}

impl ProcessInfo {
    /// A snapshot with every field unknown
    pub fn unknown(pid: u32) -> Self {
        Self {
            pid,
            command: UNKNOWN.to_string(),
            command_line: UNKNOWN.to_string(),
            executable_path: UNKNOWN.to_string(),
            status: UNKNOWN.to_string(),
        }
    }

    /// Whether the process was alive when the snapshot was taken
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}
