//! Terminal Manager
//!
//! Lifecycle controller for AI CLI sessions. Owns the session registry and the
//! platform adapter; every public operation addresses a session by name.
//!
//! Sessions run independently: the registry lock is held only while the map
//! changes, and all process I/O goes through per-session locks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use super::registry::SessionRegistry;
use super::session::{Session, TerminalSnapshot};
use super::spawn::{os_spawner, spawn_using, Spawner};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{ProcessInfo, TerminalConfig, TerminalStatus};
use crate::platform::{Platform, PlatformAdapter, PlatformStrategy};

/// Manages the lifecycle of named terminal sessions
pub struct TerminalManager {
    registry: SessionRegistry,
    adapter: PlatformAdapter,
    config: Config,
    spawner: Spawner,
    healthy: AtomicBool,
}

impl TerminalManager {
    /// Create a manager for the native platform with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a manager for the native platform
    pub fn with_config(config: Config) -> Self {
        Self::with_platform(Platform::native(), config)
    }

    /// Create a manager over an explicit platform strategy
    pub fn with_platform(strategy: Arc<dyn PlatformStrategy>, config: Config) -> Self {
        let adapter = PlatformAdapter::with_env_var(strategy, &config.environment.platform_var);
        Self {
            registry: SessionRegistry::new(),
            adapter,
            config,
            spawner: os_spawner(),
            healthy: AtomicBool::new(true),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_spawner(mut self, spawner: Spawner) -> Self {
        self.spawner = spawner;
        self
    }

    pub fn adapter(&self) -> &PlatformAdapter {
        &self.adapter
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start a new terminal session
    ///
    /// The name is reserved before the process is spawned, so a concurrent
    /// start under the same name fails with `AlreadyExists`. Any launch
    /// failure leaves the name free again.
    pub async fn start_terminal(&self, config: TerminalConfig) -> Result<()> {
        if !self.is_healthy() {
            return Err(Error::ShutDown);
        }

        if config.name.trim().is_empty() {
            return Err(Error::InvalidConfig {
                reason: "terminal name must not be empty".to_string(),
            });
        }

        let config = self.with_default_environment(config);
        let session = Arc::new(Session::new(&config));
        session.transition(TerminalStatus::Starting)?;
        self.registry.reserve(session.clone()).await?;

        info!(
            "Starting terminal '{}' ({})",
            config.name, config.terminal_type
        );

        match self.launch(&session, &config).await {
            Ok(()) => {
                info!(
                    "Terminal '{}' running with pid {:?}",
                    config.name,
                    session.pid()
                );
                Ok(())
            }
            Err(e) => {
                warn!("Failed to start terminal '{}': {}", config.name, e);
                if let Err(transition_err) = session.transition(TerminalStatus::Error) {
                    debug!("{}", transition_err);
                }
                self.registry.evict(&session).await;
                Err(e)
            }
        }
    }

    async fn launch(&self, session: &Session, config: &TerminalConfig) -> Result<()> {
        let mut spec = self.adapter.create_command(config)?;
        self.adapter.setup_environment(&mut spec, config);

        let child = spawn_using(
            self.spawner.clone(),
            &config.name,
            &spec,
            self.config.lifecycle.spawn_timeout(),
        )
        .await?;

        session.attach(child, spec.to_string()).await?;
        session.transition(TerminalStatus::Running)?;
        Ok(())
    }

    /// Manager-wide variables sit underneath the session's own
    fn with_default_environment(&self, mut config: TerminalConfig) -> TerminalConfig {
        if self.config.environment.defaults.is_empty() {
            return config;
        }

        let mut environment: HashMap<String, String> = self.config.environment.defaults.clone();
        environment.extend(config.environment.drain());
        config.environment = environment;
        config
    }

    /// Stop a running terminal; the session stays registered as `Stopped`
    pub async fn stop_terminal(&self, name: &str) -> Result<()> {
        let session = self.registry.require(name).await?;

        info!("Stopping terminal '{}'", name);
        session
            .stop(&self.adapter, self.config.lifecycle.stop_grace())
            .await?;
        info!(
            "Terminal '{}' stopped (exit code {:?})",
            name,
            session.exit_code()
        );
        Ok(())
    }

    /// Write one line of input to a running terminal
    pub async fn send_command(&self, name: &str, text: &str) -> Result<()> {
        let session = self.registry.require(name).await?;
        session.write_line(text).await?;
        debug!("Sent {} bytes to terminal '{}'", text.len() + 1, name);
        Ok(())
    }

    /// Read the next line of a terminal's output
    ///
    /// Returns `None` at end of stream, or when `timeout` elapses first.
    pub async fn read_output(&self, name: &str, timeout: Option<Duration>) -> Result<Option<String>> {
        let session = self.registry.require(name).await?;
        session.read_line(timeout).await
    }

    pub async fn get_terminal(&self, name: &str) -> Option<Arc<Session>> {
        self.registry.get(name).await
    }

    /// Snapshot of every registered session, sorted by name
    pub async fn list_terminals(&self) -> Vec<TerminalSnapshot> {
        let mut snapshots: Vec<TerminalSnapshot> = self
            .registry
            .sessions()
            .await
            .iter()
            .map(|s| s.snapshot())
            .collect();
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        snapshots
    }

    /// Forget a stopped or failed terminal so its name can be reused
    ///
    /// A session in `Error` may still hold a process whose stop failed; that
    /// process is killed before the session is dropped.
    pub async fn remove_terminal(&self, name: &str) -> Result<()> {
        let session = self.registry.require(name).await?;

        match session.status() {
            TerminalStatus::Stopped => {}
            TerminalStatus::Error => {
                session.release(self.config.lifecycle.stop_grace()).await;
            }
            status => {
                return Err(Error::InvalidTransition {
                    name: name.to_string(),
                    from: status,
                    to: TerminalStatus::Stopped,
                })
            }
        }

        self.registry.evict(&session).await;
        debug!("Removed terminal '{}'", name);
        Ok(())
    }

    /// Inspect the OS process behind a terminal
    pub async fn process_info(&self, name: &str) -> Result<ProcessInfo> {
        let session = self.registry.require(name).await?;
        let pid = session.pid().ok_or_else(|| Error::NotRunning {
            name: name.to_string(),
            status: session.status(),
        })?;

        let adapter = self.adapter.clone();
        tokio::task::spawn_blocking(move || adapter.process_info(pid))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))
    }

    /// Stop every running terminal and refuse new ones
    ///
    /// Failures do not interrupt the sweep; they are returned per name.
    /// Processes left behind by sessions in `Error` are killed as well.
    pub async fn shutdown(&self) -> Vec<(String, Error)> {
        self.healthy.store(false, Ordering::SeqCst);

        let (running, failed): (Vec<Arc<Session>>, Vec<Arc<Session>>) = self
            .registry
            .sessions()
            .await
            .into_iter()
            .filter(|s| s.is_running() || s.status() == TerminalStatus::Error)
            .partition(|s| s.is_running());

        info!("Shutting down {} running terminal(s)", running.len());

        let grace = self.config.lifecycle.stop_grace();
        join_all(failed.iter().map(|session| session.release(grace))).await;

        let results = join_all(running.iter().map(|session| async move {
            session
                .stop(&self.adapter, grace)
                .await
                .map_err(|e| (session.name().to_string(), e))
        }))
        .await;

        let failures: Vec<(String, Error)> =
            results.into_iter().filter_map(|r| r.err()).collect();
        for (name, e) in &failures {
            error!("Failed to stop terminal '{}' during shutdown: {}", name, e);
        }
        failures
    }

    /// True until [`shutdown`](Self::shutdown) is called
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for TerminalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalManager")
            .field("platform", &self.adapter.strategy().os_tag())
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("healthy", &self.is_healthy())
            .finish()
    }
}

impl Default for TerminalManager {
    fn default() -> Self {
        Self::new()
    }
}
