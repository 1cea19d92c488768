//! Platform-specific operation traits
//!
//! `PlatformStrategy` is the seam between the terminal manager and the OS.
//! One implementation is chosen at startup; tests substitute a fake.

use crate::error::Result;
use crate::models::ProcessInfo;
use std::path::PathBuf;

/// Platform-specific shell, executable and process operations
#[async_trait::async_trait]
pub trait PlatformStrategy: Send + Sync {
    /// Tag exported to children so they know which platform launched them
    fn os_tag(&self) -> &'static str;

    /// `PATH` value injected when the environment has none
    fn default_path(&self) -> &'static str;

    /// Preferred shell, chosen by probing which candidates exist
    fn default_shell(&self) -> PathBuf;

    /// Arguments that make `shell` read commands from a piped stdin
    fn shell_args(&self, _shell: &std::path::Path) -> Vec<String> {
        Vec::new()
    }

    /// Resolve a command to the executable that would be launched
    ///
    /// Never fails: unresolvable commands fall back to a name the OS may
    /// still resolve at spawn time.
    fn executable_path(&self, command: &str) -> PathBuf;

    /// Check if a command exists (stat for absolute paths, PATH lookup otherwise)
    fn validate_command(&self, command: &str) -> bool;

    /// Inspect a process by PID
    fn process_info(&self, pid: u32) -> ProcessInfo;

    /// Check if a process is still running
    fn is_process_running(&self, pid: u32) -> bool;

    /// Ask the process to exit, escalating to a forced kill if the request fails
    async fn kill_process(&self, pid: u32) -> Result<()>;

    /// Kill the process without giving it a chance to clean up
    async fn force_kill_process(&self, pid: u32) -> Result<()>;
}
