//! Unix signal operations

use crate::error::{Error, Result};
use nix::sys::signal::{kill, Signal as NixSignal};
use nix::unistd::Pid;

/// Send SIGTERM, escalating to SIGKILL if SIGTERM cannot be delivered
pub fn terminate(pid: u32) -> Result<()> {
    let target = to_pid(pid)?;

    match kill(target, NixSignal::SIGTERM) {
        Ok(()) => {
            debug!("Sent SIGTERM to {}", pid);
            Ok(())
        }
        Err(term_err) => {
            warn!("SIGTERM to {} failed ({}), escalating to SIGKILL", pid, term_err);
            kill(target, NixSignal::SIGKILL).map_err(|e| Error::KillFailure {
                pid,
                reason: format!("SIGTERM failed: {}; SIGKILL failed: {}", term_err, e),
            })
        }
    }
}

/// Send SIGKILL
pub fn force_kill(pid: u32) -> Result<()> {
    kill(to_pid(pid)?, NixSignal::SIGKILL).map_err(|e| Error::KillFailure {
        pid,
        reason: format!("SIGKILL failed: {}", e),
    })?;
    debug!("Sent SIGKILL to {}", pid);
    Ok(())
}

/// Check if a process exists by sending signal 0
pub fn is_process_running(pid: u32) -> bool {
    match to_pid(pid) {
        Ok(target) => kill(target, None).is_ok(),
        Err(_) => false,
    }
}

/// PIDs that would address a process group or every process are refused
fn to_pid(pid: u32) -> Result<Pid> {
    match i32::try_from(pid) {
        Ok(raw) if raw > 0 => Ok(Pid::from_raw(raw)),
        _ => Err(Error::KillFailure {
            pid,
            reason: "invalid pid".to_string(),
        }),
    }
}
