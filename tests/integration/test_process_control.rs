//! Integration Tests for Platform Process Control
//!
//! Termination and inspection of real child processes through the native
//! platform adapter.

use aiterm::models::ProcessInfo;
use aiterm::platform::PlatformAdapter;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};

/// Poll `process_info` until `ready` holds, returning the last snapshot
async fn process_info_when<F>(adapter: &PlatformAdapter, pid: u32, ready: F) -> ProcessInfo
where
    F: Fn(&ProcessInfo) -> bool,
{
    let mut info = adapter.process_info(pid);
    for _ in 0..50 {
        if ready(&info) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        info = adapter.process_info(pid);
    }
    info
}

fn spawn_sleeper() -> Child {
    #[cfg(windows)]
    let mut command = {
        let mut c = Command::new("ping");
        c.args(["-n", "30", "127.0.0.1"]);
        c
    };
    #[cfg(not(windows))]
    let mut command = {
        let mut c = Command::new("sleep");
        c.arg("30");
        c
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("failed to spawn sleeper")
}

#[tokio::test]
async fn test_kill_process_terminates_child() {
    let adapter = PlatformAdapter::native();
    let mut child = spawn_sleeper();
    let pid = child.id().expect("child has a pid");

    adapter.kill_process(pid).await.unwrap();

    let status = tokio::time::timeout(Duration::from_secs(5), child.wait())
        .await
        .expect("process did not exit after kill")
        .unwrap();
    assert!(!status.success());
}

#[tokio::test]
async fn test_process_info_reports_running_then_exited() {
    let adapter = PlatformAdapter::native();
    let mut child = spawn_sleeper();
    let pid = child.id().expect("child has a pid");

    #[cfg(not(windows))]
    let expected = "sleep";
    #[cfg(windows)]
    let expected = "ping";
    let info = process_info_when(&adapter, pid, |i| {
        i.command.to_lowercase().contains(expected)
    })
    .await;
    assert_eq!(info.pid, pid);
    assert_eq!(info.status, "running");
    #[cfg(not(windows))]
    assert!(info.command.contains("sleep"), "command was {}", info.command);
    #[cfg(windows)]
    assert!(info.command.to_lowercase().contains("ping"));

    child.kill().await.unwrap();
    child.wait().await.unwrap();

    let info = adapter.process_info(pid);
    assert_eq!(info.status, "exited");
}

#[tokio::test]
async fn test_is_process_running_tracks_child() {
    let adapter = PlatformAdapter::native();
    let mut child = spawn_sleeper();
    let pid = child.id().expect("child has a pid");

    assert!(adapter.strategy().is_process_running(pid));

    child.kill().await.unwrap();
    child.wait().await.unwrap();

    assert!(!adapter.strategy().is_process_running(pid));
}

#[cfg(unix)]
#[tokio::test]
async fn test_kill_invalid_pid_fails() {
    let adapter = PlatformAdapter::native();
    let err = adapter.kill_process(0).await.unwrap_err();
    assert!(matches!(err, aiterm::Error::KillFailure { pid: 0, .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_info_command_line() {
    let adapter = PlatformAdapter::native();
    let mut child = spawn_sleeper();
    let pid = child.id().expect("child has a pid");

    let info = process_info_when(&adapter, pid, |i| {
        i.command.contains("sleep") && i.command_line.contains("30")
    })
    .await;
    assert!(info.command_line.contains("30"), "command line was {}", info.command_line);

    child.kill().await.unwrap();
    child.wait().await.unwrap();
}
