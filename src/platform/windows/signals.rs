//! Windows process termination

use crate::error::{Error, Result};
use std::process::{Command, Stdio};

/// `taskkill /F /PID <pid>`
///
/// Console programs have no graceful close request on Windows, so the
/// forced form is the only step.
pub async fn terminate(pid: u32) -> Result<()> {
    let output = tokio::process::Command::new("taskkill")
        .args(["/F", "/PID", &pid.to_string()])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| Error::KillFailure {
            pid,
            reason: format!("failed to run taskkill: {}", e),
        })?;

    if output.status.success() {
        debug!("taskkill terminated {}", pid);
        Ok(())
    } else {
        Err(Error::KillFailure {
            pid,
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// A process is running while its exit code reads STILL_ACTIVE
pub fn is_process_running(pid: u32) -> bool {
    use windows_sys::Win32::Foundation::{CloseHandle, STILL_ACTIVE};
    use windows_sys::Win32::System::Threading::{
        GetExitCodeProcess, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION,
    };

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
        if handle.is_null() {
            return false;
        }

        let mut code: u32 = 0;
        let ok = GetExitCodeProcess(handle, &mut code);
        CloseHandle(handle);

        ok != 0 && code == STILL_ACTIVE as u32
    }
}

/// Fallback liveness check when the Win32 query is denied
pub fn listed_by_tasklist(pid: u32) -> bool {
    Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .stderr(Stdio::null())
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).contains(&pid.to_string()))
        .unwrap_or(false)
}
