//! Windows process inspection via `tasklist` and the Win32 API
//!
//! Neither source exposes another process's arguments, so `command_line`
//! is always reported as unknown.

use std::process::{Command, Stdio};

use crate::models::process_info::{ProcessInfo, UNKNOWN};

/// Collect a process snapshot; fields that cannot be read are "unknown"
pub fn process_info(pid: u32, running: bool) -> ProcessInfo {
    ProcessInfo {
        pid,
        command: image_name(pid).unwrap_or_else(|| UNKNOWN.to_string()),
        command_line: UNKNOWN.to_string(),
        executable_path: image_path(pid).unwrap_or_else(|| UNKNOWN.to_string()),
        status: if running { "running" } else { "exited" }.to_string(),
    }
}

/// `tasklist /FI "PID eq <pid>" /FO CSV /NH`
fn image_name(pid: u32) -> Option<String> {
    let output = Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/FO", "CSV", "/NH"])
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    parse_tasklist_csv(&String::from_utf8_lossy(&output.stdout))
}

/// First CSV field of the first line, unquoted
///
/// tasklist prints an "INFO:" line instead of CSV when nothing matches.
pub fn parse_tasklist_csv(output: &str) -> Option<String> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;
    if !line.starts_with('"') {
        return None;
    }
    let name = line.split(',').next()?.trim_matches('"').trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn image_path(pid: u32) -> Option<String> {
    use windows_sys::Win32::Foundation::CloseHandle;
    use windows_sys::Win32::System::Threading::{
        OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32,
        PROCESS_QUERY_LIMITED_INFORMATION,
    };

    let mut buf = [0u16; 1024];
    let mut size = buf.len() as u32;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
        if handle.is_null() {
            return None;
        }
        let ok = QueryFullProcessImageNameW(handle, PROCESS_NAME_WIN32, buf.as_mut_ptr(), &mut size);
        CloseHandle(handle);
        if ok == 0 {
            return None;
        }
    }

    Some(String::from_utf16_lossy(&buf[..size as usize]))
}
