//! Terminal Session
//!
//! One named session paired with exactly one child process. The session owns
//! the process handle and both stdio pipes; its status lives behind a small
//! synchronous lock so UI pollers can read it without awaiting.
//!
//! Lock layout:
//! - `state` (std `RwLock`): status and timestamps, never held across `.await`
//! - `stdin` (tokio `Mutex`): serializes writes against teardown
//! - `stdout` (tokio `Mutex`): line reader, independent of writes
//! - `child` (tokio `Mutex`): process handle for kill and wait
//!
//! Teardown takes `stdin` before `child`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{TerminalConfig, TerminalStatus, TerminalType};
use crate::platform::PlatformAdapter;

/// Mutable session fields guarded by the status lock
#[derive(Debug, Clone)]
struct SessionState {
    status: TerminalStatus,
    pid: Option<u32>,
    command: Option<String>,
    started_at: Option<DateTime<Utc>>,
    last_used: DateTime<Utc>,
    exit_code: Option<i32>,
}

/// Point-in-time copy of a session for list displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalSnapshot {
    pub name: String,
    pub id: Uuid,
    pub terminal_type: TerminalType,
    pub status: TerminalStatus,
    pub pid: Option<u32>,
    pub command: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub last_used: DateTime<Utc>,
    pub exit_code: Option<i32>,
}

/// A terminal session running one AI CLI process
pub struct Session {
    name: String,
    id: Uuid,
    terminal_type: TerminalType,
    state: RwLock<SessionState>,
    stdin: Mutex<Option<BufWriter<ChildStdin>>>,
    stdout: Mutex<Option<Lines<BufReader<ChildStdout>>>>,
    child: Mutex<Option<Child>>,
}

impl Session {
    /// Create a session in the `Stopped` state with no process attached
    pub fn new(config: &TerminalConfig) -> Self {
        Self {
            name: config.name.clone(),
            id: Uuid::new_v4(),
            terminal_type: config.terminal_type,
            state: RwLock::new(SessionState {
                status: TerminalStatus::Stopped,
                pid: None,
                command: None,
                started_at: None,
                last_used: Utc::now(),
                exit_code: None,
            }),
            stdin: Mutex::new(None),
            stdout: Mutex::new(None),
            child: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique per instance; a re-created session with the same name gets a new id
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn terminal_type(&self) -> TerminalType {
        self.terminal_type
    }

    pub fn status(&self) -> TerminalStatus {
        self.read_state().status
    }

    pub fn is_running(&self) -> bool {
        self.status().is_running()
    }

    pub fn pid(&self) -> Option<u32> {
        self.read_state().pid
    }

    pub fn last_used(&self) -> DateTime<Utc> {
        self.read_state().last_used
    }

    /// Exit code recorded by the last stop, if the process reported one
    pub fn exit_code(&self) -> Option<i32> {
        self.read_state().exit_code
    }

    /// Whether the attached process has exited on its own
    ///
    /// A session with no process counts as exited.
    pub async fn has_exited(&self) -> bool {
        match self.child.lock().await.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(Some(_))),
            None => true,
        }
    }

    /// Copy the session's observable fields
    pub fn snapshot(&self) -> TerminalSnapshot {
        let state = self.read_state();
        TerminalSnapshot {
            name: self.name.clone(),
            id: self.id,
            terminal_type: self.terminal_type,
            status: state.status,
            pid: state.pid,
            command: state.command.clone(),
            started_at: state.started_at,
            last_used: state.last_used,
            exit_code: state.exit_code,
        }
    }

    /// Move to `next`, rejecting anything the state machine forbids
    ///
    /// This is the only place status changes. Returns the previous status.
    pub(crate) fn transition(&self, next: TerminalStatus) -> Result<TerminalStatus> {
        let mut state = self.write_state();
        let current = state.status;
        if !current.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                name: self.name.clone(),
                from: current,
                to: next,
            });
        }
        state.status = next;
        debug!("Terminal '{}' {} -> {}", self.name, current, next);
        Ok(current)
    }

    /// Take ownership of a freshly spawned process and its pipes
    pub(crate) async fn attach(&self, mut child: Child, command: String) -> Result<()> {
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::pipe(&self.name, "stdin pipe not available"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::pipe(&self.name, "stdout pipe not available"))?;

        *self.stdin.lock().await = Some(BufWriter::new(stdin));
        *self.stdout.lock().await = Some(BufReader::new(stdout).lines());

        {
            let mut state = self.write_state();
            state.pid = child.id();
            state.command = Some(command);
            state.started_at = Some(Utc::now());
            state.last_used = Utc::now();
        }

        *self.child.lock().await = Some(child);
        Ok(())
    }

    /// Write `text` and a newline to the process, then flush
    ///
    /// Holds the stdin lock for the whole write, so a concurrent stop either
    /// waits for it or is observed here as a non-running status.
    pub(crate) async fn write_line(&self, text: &str) -> Result<()> {
        let mut stdin = self.stdin.lock().await;

        let status = self.status();
        if status != TerminalStatus::Running {
            return Err(Error::NotRunning {
                name: self.name.clone(),
                status,
            });
        }

        let writer = stdin
            .as_mut()
            .ok_or_else(|| Error::pipe(&self.name, "stdin not available"))?;

        writer
            .write_all(text.as_bytes())
            .await
            .map_err(|e| Error::pipe(&self.name, format!("failed to write command: {}", e)))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| Error::pipe(&self.name, format!("failed to write command: {}", e)))?;
        writer
            .flush()
            .await
            .map_err(|e| Error::pipe(&self.name, format!("failed to flush command: {}", e)))?;

        self.write_state().last_used = Utc::now();
        Ok(())
    }

    /// Next line of stdout; `None` at end of stream or when `timeout` elapses
    pub(crate) async fn read_line(&self, timeout: Option<Duration>) -> Result<Option<String>> {
        let mut stdout = self.stdout.lock().await;
        let lines = stdout.as_mut().ok_or_else(|| Error::NotRunning {
            name: self.name.clone(),
            status: self.status(),
        })?;

        let next = match timeout {
            Some(limit) => match tokio::time::timeout(limit, lines.next_line()).await {
                Ok(result) => result,
                Err(_) => return Ok(None),
            },
            None => lines.next_line().await,
        };

        next.map_err(|e| Error::pipe(&self.name, format!("failed to read output: {}", e)))
    }

    /// Stop the process: close stdin, request termination, wait, force if needed
    ///
    /// Stopping a `Stopped` session does nothing. Sessions that are starting
    /// or already stopping are rejected.
    pub(crate) async fn stop(&self, adapter: &PlatformAdapter, grace: Duration) -> Result<()> {
        let mut stdin = self.stdin.lock().await;

        match self.status() {
            TerminalStatus::Stopped => {
                debug!("Terminal '{}' already stopped", self.name);
                return Ok(());
            }
            TerminalStatus::Running => {}
            other => {
                return Err(Error::InvalidTransition {
                    name: self.name.clone(),
                    from: other,
                    to: TerminalStatus::Stopping,
                })
            }
        }

        self.transition(TerminalStatus::Stopping)?;

        if let Some(mut writer) = stdin.take() {
            if let Err(e) = writer.shutdown().await {
                debug!("Closing stdin of '{}' failed: {}", self.name, e);
            }
        }
        drop(stdin);

        let mut child_slot = self.child.lock().await;
        let exit_code = match child_slot.as_mut() {
            Some(child) => match self.terminate_child(child, adapter, grace).await {
                Ok(code) => code,
                Err(e) => {
                    error!("Failed to stop terminal '{}': {}", self.name, e);
                    self.transition(TerminalStatus::Error)?;
                    return Err(e);
                }
            },
            None => None,
        };
        *child_slot = None;
        drop(child_slot);

        self.write_state().exit_code = exit_code;
        self.transition(TerminalStatus::Stopped)?;
        Ok(())
    }

    /// Drop the pipes of an `Error` session and kill whatever process it still holds
    ///
    /// Leaves the status as it is; the caller evicts the session afterwards.
    pub(crate) async fn release(&self, grace: Duration) {
        self.stdin.lock().await.take();
        self.stdout.lock().await.take();

        let child = self.child.lock().await.take();
        if let Some(mut child) = child {
            if let Ok(Some(_)) = child.try_wait() {
                return;
            }
            debug!("Releasing process {:?} of '{}'", child.id(), self.name);
            if let Err(e) = child.start_kill() {
                warn!("Failed to kill process of '{}': {}", self.name, e);
                return;
            }
            if tokio::time::timeout(grace, child.wait()).await.is_err() {
                warn!("Process of '{}' did not exit within {:?}", self.name, grace);
            }
        }
    }

    async fn terminate_child(
        &self,
        child: &mut Child,
        adapter: &PlatformAdapter,
        grace: Duration,
    ) -> Result<Option<i32>> {
        // Exited on its own (or closed on stdin EOF)
        if let Ok(Some(status)) = child.try_wait() {
            return Ok(status.code());
        }

        let pid = child.id().unwrap_or_default();
        if let Err(e) = adapter.kill_process(pid).await {
            warn!("Termination request for '{}' failed: {}", self.name, e);
        }

        match tokio::time::timeout(grace, child.wait()).await {
            Ok(Ok(status)) => return Ok(status.code()),
            Ok(Err(e)) => {
                return Err(Error::KillFailure {
                    pid,
                    reason: format!("failed to wait for exit: {}", e),
                })
            }
            Err(_) => warn!(
                "Terminal '{}' (pid {}) still alive after {:?}, forcing kill",
                self.name, pid, grace
            ),
        }

        adapter.force_kill_process(pid).await?;

        match tokio::time::timeout(grace, child.wait()).await {
            Ok(Ok(status)) => Ok(status.code()),
            Ok(Err(e)) => Err(Error::KillFailure {
                pid,
                reason: format!("failed to wait for exit: {}", e),
            }),
            Err(_) => Err(Error::KillFailure {
                pid,
                reason: format!("process still alive {:?} after forced kill", grace),
            }),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("terminal_type", &self.terminal_type)
            .field("status", &self.status())
            .field("pid", &self.pid())
            .finish()
    }
}
