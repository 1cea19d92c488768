//! Contract Tests for Failed Terminal Starts
//!
//! A start that fails for any reason must leave no session behind, so the
//! same name can be started again.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use aiterm::{Config, Error, TerminalConfig, TerminalManager, TerminalStatus, TerminalType};
use std::sync::Arc;
use test_utils::{fake_manager, fast_manager, missing_command_config, shell_config, FakePlatform};

#[tokio::test]
async fn test_missing_executable_is_spawn_failure() {
    let manager = fast_manager();

    let err = manager
        .start_terminal(missing_command_config("broken"))
        .await
        .unwrap_err();
    match &err {
        Error::SpawnFailure { name, command, .. } => {
            assert_eq!(name, "broken");
            assert!(command.contains("aiterm-test-missing-binary"));
        }
        other => panic!("expected SpawnFailure, got {:?}", other),
    }

    assert!(manager.get_terminal("broken").await.is_none());
    assert!(manager.list_terminals().await.is_empty());
}

#[tokio::test]
async fn test_name_free_after_failed_start() {
    let manager = fast_manager();

    assert!(manager
        .start_terminal(missing_command_config("retry"))
        .await
        .is_err());

    manager.start_terminal(shell_config("retry")).await.unwrap();
    assert_eq!(
        manager.get_terminal("retry").await.unwrap().status(),
        TerminalStatus::Running
    );
    manager.stop_terminal("retry").await.unwrap();
}

#[tokio::test]
async fn test_uninstalled_tool_fails_to_start() {
    // Nothing resolves, so `aider` is launched by bare name and must fail
    let platform = Arc::new(FakePlatform::with_installed(Vec::<String>::new()));
    let manager = fake_manager(platform);

    let config = TerminalConfig::new(TerminalType::Aider, "aider")
        .with_env("PATH", "/nonexistent/aiterm-empty-path");
    let err = manager.start_terminal(config).await.unwrap_err();
    assert!(matches!(err, Error::SpawnFailure { .. }), "got {:?}", err);
    assert!(manager.get_terminal("aider").await.is_none());
}

#[tokio::test]
async fn test_blank_custom_command_is_unsupported() {
    let manager = fast_manager();

    let config = TerminalConfig::new(TerminalType::Custom, "blank").with_command("   ");
    let err = manager.start_terminal(config).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { .. }));
    assert!(manager.get_terminal("blank").await.is_none());
}

#[tokio::test]
async fn test_empty_name_is_invalid_config() {
    let manager = fast_manager();

    let err = manager.start_terminal(shell_config("")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert!(manager.list_terminals().await.is_empty());
}

#[tokio::test]
async fn test_missing_working_dir_is_spawn_failure() {
    let manager = fast_manager();

    let config = shell_config("nowhere").with_working_dir("/nonexistent/aiterm-test-dir");
    let err = manager.start_terminal(config).await.unwrap_err();
    assert!(matches!(err, Error::SpawnFailure { .. }));
    assert!(manager.get_terminal("nowhere").await.is_none());
}

#[tokio::test]
async fn test_failures_do_not_affect_other_sessions() {
    let manager = TerminalManager::with_config(Config::default());
    manager.start_terminal(shell_config("healthy")).await.unwrap();

    assert!(manager
        .start_terminal(missing_command_config("broken"))
        .await
        .is_err());

    let names: Vec<String> = manager
        .list_terminals()
        .await
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["healthy"]);
    assert!(manager.get_terminal("healthy").await.unwrap().is_running());

    manager.stop_terminal("healthy").await.unwrap();
}
