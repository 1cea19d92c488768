//! Test Utilities and Fakes
//!
//! `FakePlatform` answers executable lookups from a fixed table and records
//! kill requests, while still launching a real shell so sessions have a live
//! process behind them.

#![allow(dead_code)]

use aiterm::error::{Error, Result};
use aiterm::models::ProcessInfo;
use aiterm::platform::{Platform, PlatformStrategy};
use aiterm::{Config, TerminalConfig, TerminalManager, TerminalType};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Directory the fake pretends every installed tool lives in
pub const FAKE_BIN_DIR: &str = "/opt/fake/bin";

/// Platform strategy with a scripted command table
pub struct FakePlatform {
    installed: HashSet<String>,
    native: Arc<dyn PlatformStrategy>,
    kill_requests: Mutex<Vec<u32>>,
    force_kill_requests: Mutex<Vec<u32>>,
    refuse_kill: bool,
    refuse_force_kill: bool,
}

impl FakePlatform {
    /// A fake where exactly `installed` resolve
    pub fn with_installed<I, S>(installed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: installed.into_iter().map(Into::into).collect(),
            native: Platform::native(),
            kill_requests: Mutex::new(Vec::new()),
            force_kill_requests: Mutex::new(Vec::new()),
            refuse_kill: false,
            refuse_force_kill: false,
        }
    }

    /// A fake where every built-in AI tool resolves
    pub fn all_tools() -> Self {
        Self::with_installed(
            TerminalType::ALL
                .iter()
                .filter_map(|t| t.command_name()),
        )
    }

    /// Make termination requests fail (the manager must still force-kill)
    pub fn refusing_kill(mut self) -> Self {
        self.refuse_kill = true;
        self
    }

    /// Make forced kills fail too, so a stop cannot complete
    pub fn refusing_force_kill(mut self) -> Self {
        self.refuse_force_kill = true;
        self
    }

    /// PIDs passed to `force_kill_process`, in order
    pub fn force_kill_requests(&self) -> Vec<u32> {
        self.force_kill_requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// PIDs passed to `kill_process`, in order
    pub fn kill_requests(&self) -> Vec<u32> {
        self.kill_requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl PlatformStrategy for FakePlatform {
    fn os_tag(&self) -> &'static str {
        "fake"
    }

    fn default_path(&self) -> &'static str {
        FAKE_BIN_DIR
    }

    fn default_shell(&self) -> PathBuf {
        self.native.default_shell()
    }

    fn shell_args(&self, shell: &Path) -> Vec<String> {
        self.native.shell_args(shell)
    }

    fn executable_path(&self, command: &str) -> PathBuf {
        if self.installed.contains(command) {
            Path::new(FAKE_BIN_DIR).join(command)
        } else {
            PathBuf::from(command)
        }
    }

    fn validate_command(&self, command: &str) -> bool {
        self.installed.contains(command)
    }

    fn process_info(&self, pid: u32) -> ProcessInfo {
        self.native.process_info(pid)
    }

    fn is_process_running(&self, pid: u32) -> bool {
        self.native.is_process_running(pid)
    }

    async fn kill_process(&self, pid: u32) -> Result<()> {
        self.kill_requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(pid);

        if self.refuse_kill {
            return Err(Error::KillFailure {
                pid,
                reason: "refused by fake platform".to_string(),
            });
        }
        self.native.kill_process(pid).await
    }

    async fn force_kill_process(&self, pid: u32) -> Result<()> {
        self.force_kill_requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(pid);

        if self.refuse_force_kill {
            return Err(Error::KillFailure {
                pid,
                reason: "forced kill refused by fake platform".to_string(),
            });
        }
        self.native.force_kill_process(pid).await
    }
}

/// Manager with short timeouts over the native platform
pub fn fast_manager() -> TerminalManager {
    TerminalManager::with_config(fast_config())
}

/// Manager with short timeouts over a fake platform
pub fn fake_manager(platform: Arc<FakePlatform>) -> TerminalManager {
    TerminalManager::with_platform(platform, fast_config())
}

pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.lifecycle.spawn_timeout_ms = 5_000;
    config.lifecycle.stop_grace_ms = 1_000;
    config
}

/// A session running the default shell, which stays alive reading stdin
pub fn shell_config(name: &str) -> TerminalConfig {
    TerminalConfig::new(TerminalType::Custom, name)
}

/// A session running a command that is guaranteed not to exist
pub fn missing_command_config(name: &str) -> TerminalConfig {
    TerminalConfig::new(TerminalType::Custom, name)
        .with_command("/nonexistent/aiterm-test-missing-binary")
}
