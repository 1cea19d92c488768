//! Platform Adapter
//!
//! Turns a `TerminalConfig` into a launchable `CommandSpec` using the active
//! `PlatformStrategy`, and assembles the child environment.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;

use super::command::CommandSpec;
use super::traits::PlatformStrategy;
use crate::error::{Error, Result};
use crate::models::{ProcessInfo, TerminalConfig, TerminalType};

/// Default name of the variable that tells children which platform launched them
pub const PLATFORM_ENV_VAR: &str = "AI_TERMINAL_PLATFORM";

/// Builds commands and environments for terminal sessions
#[derive(Clone)]
pub struct PlatformAdapter {
    strategy: Arc<dyn PlatformStrategy>,
    platform_env_var: String,
}

impl PlatformAdapter {
    /// Create an adapter over the given strategy
    pub fn new(strategy: Arc<dyn PlatformStrategy>) -> Self {
        Self::with_env_var(strategy, PLATFORM_ENV_VAR)
    }

    /// Create an adapter that exports the platform tag under a custom name
    pub fn with_env_var(strategy: Arc<dyn PlatformStrategy>, var: impl Into<String>) -> Self {
        Self {
            strategy,
            platform_env_var: var.into(),
        }
    }

    /// Adapter for the platform this binary was built for
    pub fn native() -> Self {
        Self::new(super::Platform::native())
    }

    /// The underlying strategy
    pub fn strategy(&self) -> &Arc<dyn PlatformStrategy> {
        &self.strategy
    }

    /// Get the default shell for the current platform
    pub fn default_shell(&self) -> PathBuf {
        self.strategy.default_shell()
    }

    /// Get the full executable path for a command
    pub fn executable_path(&self, command: &str) -> PathBuf {
        self.strategy.executable_path(command)
    }

    /// Check if a command exists
    pub fn validate_command(&self, command: &str) -> bool {
        self.strategy.validate_command(command)
    }

    /// Inspect a process by PID
    pub fn process_info(&self, pid: u32) -> ProcessInfo {
        self.strategy.process_info(pid)
    }

    /// Terminate a process by PID, escalating if the graceful request fails
    pub async fn kill_process(&self, pid: u32) -> Result<()> {
        self.strategy.kill_process(pid).await
    }

    /// Map a terminal config to a concrete command
    ///
    /// Built-in tools resolve their executable through the strategy; `Custom`
    /// runs `config.command`, or the default shell when no command is given.
    pub fn create_command(&self, config: &TerminalConfig) -> Result<CommandSpec> {
        let mut spec = match config.terminal_type.command_name() {
            Some(name) => {
                let mut spec = CommandSpec::new(self.strategy.executable_path(name));
                spec.args
                    .extend(config.terminal_type.base_args().iter().map(|a| a.to_string()));
                if config.yolo_mode {
                    if let Some(flag) = config.terminal_type.yolo_flag() {
                        spec.args.push(flag.to_string());
                    }
                }
                spec
            }
            None => self.custom_command(config)?,
        };

        if let Some(dir) = &config.working_dir {
            if !dir.as_os_str().is_empty() {
                spec.working_dir = Some(dir.clone());
            }
        }

        spec.args.extend(config.args.iter().cloned());

        debug!(
            "Built command for terminal '{}' ({}): {}",
            config.name, config.terminal_type, spec
        );
        Ok(spec)
    }

    fn custom_command(&self, config: &TerminalConfig) -> Result<CommandSpec> {
        match config.command.as_deref().map(str::trim) {
            Some("") => Err(Error::UnsupportedType {
                terminal_type: TerminalType::Custom.to_string(),
                reason: "custom terminal has an empty command".to_string(),
            }),
            Some(command) => Ok(CommandSpec::new(self.strategy.executable_path(command))),
            None => {
                let shell = self.strategy.default_shell();
                let mut spec = CommandSpec::new(&shell);
                spec.args = self.strategy.shell_args(&shell);
                Ok(spec)
            }
        }
    }

    /// Terminate a process immediately, skipping any graceful request
    pub async fn force_kill_process(&self, pid: u32) -> Result<()> {
        self.strategy.force_kill_process(pid).await
    }

    /// Attach the session's environment overrides to a command
    ///
    /// The child inherits this process's environment untouched (including
    /// variables that are not valid UTF-8); the config's variables and then
    /// the platform tag are set on top. A `PATH` is added only if neither
    /// layer has one.
    pub fn setup_environment(&self, spec: &mut CommandSpec, config: &TerminalConfig) {
        spec.env = Some(environment_overrides(
            std::env::vars_os().map(|(key, _)| key),
            &config.environment,
            &self.platform_env_var,
            self.strategy.os_tag(),
            self.strategy.default_path(),
        ));
    }
}

/// Variables to set on top of an inherited environment
///
/// `inherited_keys` names the variables the child already inherits; only
/// their names matter. `PATH` is matched case-insensitively, so a
/// Windows-style `Path` counts as present.
pub fn environment_overrides<I, K>(
    inherited_keys: I,
    custom: &HashMap<String, String>,
    platform_var: &str,
    os_tag: &str,
    default_path: &str,
) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = K>,
    K: AsRef<OsStr>,
{
    let mut env: BTreeMap<String, String> = custom
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    env.insert(platform_var.to_string(), os_tag.to_string());

    let has_path = env.keys().any(|k| k.eq_ignore_ascii_case("PATH"))
        || inherited_keys.into_iter().any(|k| {
            k.as_ref()
                .to_str()
                .is_some_and(|k| k.eq_ignore_ascii_case("PATH"))
        });
    if !has_path {
        env.insert("PATH".to_string(), default_path.to_string());
    }

    env
}
