//! Unix-specific platform implementations

mod filesystem;
mod process;
mod shell;
mod signals;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::ProcessInfo;
use crate::platform::traits::PlatformStrategy;

/// Linux, macOS and other Unix-like systems
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixPlatform;

impl UnixPlatform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PlatformStrategy for UnixPlatform {
    fn os_tag(&self) -> &'static str {
        "unix"
    }

    fn default_path(&self) -> &'static str {
        "/usr/local/bin:/usr/bin:/bin"
    }

    fn default_shell(&self) -> PathBuf {
        shell::default_shell()
    }

    fn shell_args(&self, shell: &Path) -> Vec<String> {
        shell::shell_args(shell)
    }

    fn executable_path(&self, command: &str) -> PathBuf {
        filesystem::executable_path(command)
    }

    fn validate_command(&self, command: &str) -> bool {
        filesystem::validate_command(command)
    }

    fn process_info(&self, pid: u32) -> ProcessInfo {
        process::process_info(pid, signals::is_process_running(pid))
    }

    fn is_process_running(&self, pid: u32) -> bool {
        signals::is_process_running(pid)
    }

    async fn kill_process(&self, pid: u32) -> Result<()> {
        signals::terminate(pid)
    }

    async fn force_kill_process(&self, pid: u32) -> Result<()> {
        signals::force_kill(pid)
    }
}
