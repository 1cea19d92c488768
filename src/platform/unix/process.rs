//! Unix process inspection
//!
//! Linux exposes everything under `/proc`; other Unixes (and restricted
//! containers) fall back to `ps`.

use std::fs;
use std::process::{Command, Stdio};

use crate::models::process_info::{ProcessInfo, UNKNOWN};

/// Collect a process snapshot; fields that cannot be read are "unknown"
pub fn process_info(pid: u32, running: bool) -> ProcessInfo {
    ProcessInfo {
        pid,
        command: command_name(pid),
        command_line: command_line(pid),
        executable_path: executable_path(pid),
        status: if running { "running" } else { "exited" }.to_string(),
    }
}

/// `/proc/<pid>/comm`, then `ps -o comm=`
fn command_name(pid: u32) -> String {
    if let Ok(data) = fs::read_to_string(format!("/proc/{}/comm", pid)) {
        let name = data.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }
    ps_field(pid, "comm=").unwrap_or_else(|| UNKNOWN.to_string())
}

/// `/proc/<pid>/cmdline`, then `ps -o args=`
fn command_line(pid: u32) -> String {
    if let Ok(data) = fs::read(format!("/proc/{}/cmdline", pid)) {
        let line = parse_cmdline(&data);
        if !line.is_empty() {
            return line;
        }
    }
    ps_field(pid, "args=").unwrap_or_else(|| UNKNOWN.to_string())
}

fn executable_path(pid: u32) -> String {
    fs::read_link(format!("/proc/{}/exe", pid))
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

fn ps_field(pid: u32, field: &str) -> Option<String> {
    let output = Command::new("ps")
        .args(["-p", &pid.to_string(), "-o", field])
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Arguments in `/proc/<pid>/cmdline` are NUL-separated
pub fn parse_cmdline(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .split('\0')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
