//! Unit Tests for the Platform Adapter
//!
//! Command construction and environment assembly against a fake platform,
//! plus command validation against the real one.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use aiterm::platform::{CommandSpec, PlatformAdapter, PLATFORM_ENV_VAR};
use aiterm::{Error, TerminalConfig, TerminalType};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use test_utils::{FakePlatform, FAKE_BIN_DIR};

fn fake_adapter() -> PlatformAdapter {
    PlatformAdapter::new(Arc::new(FakePlatform::all_tools()))
}

fn tool(name: &str) -> PathBuf {
    Path::new(FAKE_BIN_DIR).join(name)
}

#[test]
fn test_claude_yolo_command() {
    let adapter = fake_adapter();
    let config = TerminalConfig::new(TerminalType::ClaudeCode, "claude")
        .with_yolo_mode(true)
        .with_working_dir("/tmp")
        .with_args(["--model", "opus"]);

    let spec = adapter.create_command(&config).unwrap();
    assert_eq!(spec.program, tool("claude"));
    assert_eq!(
        spec.args,
        ["--dangerously-skip-permissions", "--model", "opus"]
    );
    assert_eq!(spec.working_dir.as_deref(), Some(Path::new("/tmp")));
}

#[test]
fn test_claude_without_yolo() {
    let adapter = fake_adapter();
    let config = TerminalConfig::new(TerminalType::ClaudeCode, "claude");

    let spec = adapter.create_command(&config).unwrap();
    assert_eq!(spec.argv(), [tool("claude").to_string_lossy().into_owned()]);
    assert!(spec.working_dir.is_none());
}

#[test]
fn test_tool_table() {
    let adapter = fake_adapter();
    let cases: &[(TerminalType, &str, &[&str], &[&str])] = &[
        (TerminalType::GeminiCli, "gemini", &[], &["--yolo"]),
        (TerminalType::Cursor, "cursor", &["--cli"], &["--cli"]),
        (TerminalType::Aider, "aider", &[], &["--yes"]),
        (
            TerminalType::Codex,
            "codex",
            &[],
            &["--dangerously-bypass-approvals-and-sandbox"],
        ),
    ];

    for (terminal_type, command, plain, yolo) in cases {
        let config = TerminalConfig::new(*terminal_type, "t");
        let spec = adapter.create_command(&config).unwrap();
        assert_eq!(spec.program, tool(command));
        assert_eq!(spec.args, *plain, "{} without yolo", terminal_type);

        let spec = adapter
            .create_command(&config.clone().with_yolo_mode(true))
            .unwrap();
        assert_eq!(spec.args, *yolo, "{} with yolo", terminal_type);
    }
}

#[test]
fn test_custom_command() {
    let adapter = PlatformAdapter::new(Arc::new(FakePlatform::with_installed(["my-agent"])));
    let config = TerminalConfig::new(TerminalType::Custom, "custom")
        .with_command("my-agent")
        .with_args(["--fast"])
        .with_yolo_mode(true);

    let spec = adapter.create_command(&config).unwrap();
    assert_eq!(spec.program, tool("my-agent"));
    assert_eq!(spec.args, ["--fast"]);
}

#[test]
fn test_custom_without_command_uses_default_shell() {
    let adapter = fake_adapter();
    let config = TerminalConfig::new(TerminalType::Custom, "shell");

    let spec = adapter.create_command(&config).unwrap();
    assert_eq!(spec.program, adapter.default_shell());
}

#[test]
fn test_blank_custom_command_unsupported() {
    let adapter = fake_adapter();
    let config = TerminalConfig::new(TerminalType::Custom, "blank").with_command("");

    let err = adapter.create_command(&config).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { .. }));
}

#[test]
fn test_empty_working_dir_ignored() {
    let adapter = fake_adapter();
    let config = TerminalConfig::new(TerminalType::Aider, "aider").with_working_dir("");

    let spec = adapter.create_command(&config).unwrap();
    assert!(spec.working_dir.is_none());
}

#[test]
fn test_setup_environment_layers() {
    let adapter = fake_adapter();
    let config = TerminalConfig::new(TerminalType::ClaudeCode, "env")
        .with_env("AITERM_TEST_VALUE", "custom")
        .with_env(PLATFORM_ENV_VAR, "overridden");

    let mut spec = CommandSpec::new("claude");
    adapter.setup_environment(&mut spec, &config);
    let env = spec.env.expect("environment is set");

    assert_eq!(env.get("AITERM_TEST_VALUE").map(String::as_str), Some("custom"));
    // The platform tag is applied last
    assert_eq!(env.get(PLATFORM_ENV_VAR).map(String::as_str), Some("fake"));

    // Inherited variables are left to the OS, not copied
    let inherited_path = std::env::vars_os()
        .any(|(k, _)| k.to_str().is_some_and(|k| k.eq_ignore_ascii_case("PATH")));
    assert_eq!(env.keys().any(|k| k.eq_ignore_ascii_case("PATH")), !inherited_path);
    assert!(!env.contains_key("HOME"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_utf8_variables_are_inherited() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    std::env::set_var("AITERM_RAW_BYTES", OsString::from_vec(vec![0xff, 0x61]));

    let adapter = PlatformAdapter::native();
    let config = TerminalConfig::new(TerminalType::Custom, "raw")
        .with_command("/bin/sh")
        .with_args(["-c", r#"test -n "$AITERM_RAW_BYTES" && echo "$AITERM_EXTRA""#])
        .with_env("AITERM_EXTRA", "present");

    let mut spec = adapter.create_command(&config).unwrap();
    adapter.setup_environment(&mut spec, &config);

    let output = spec.to_command().spawn().unwrap().wait_with_output().await.unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "present");
}

#[test]
fn test_custom_platform_variable_name() {
    let adapter = PlatformAdapter::with_env_var(Arc::new(FakePlatform::all_tools()), "MY_PLATFORM");
    let config = TerminalConfig::new(TerminalType::ClaudeCode, "env");

    let mut spec = CommandSpec::new("claude");
    adapter.setup_environment(&mut spec, &config);
    let env = spec.env.unwrap();

    assert_eq!(env.get("MY_PLATFORM").map(String::as_str), Some("fake"));
}

#[test]
fn test_validate_command_native() {
    let adapter = PlatformAdapter::native();

    #[cfg(unix)]
    {
        assert!(adapter.validate_command("sh"));
        assert!(adapter.validate_command("/bin/sh"));
    }
    #[cfg(windows)]
    assert!(adapter.validate_command("cmd"));

    assert!(!adapter.validate_command("aiterm-definitely-not-a-command-7f3a"));
    assert!(!adapter.validate_command("/nonexistent/aiterm/tool"));
}

#[test]
fn test_default_shell_exists() {
    let adapter = PlatformAdapter::native();
    let shell = adapter.default_shell();
    assert!(adapter.validate_command(&shell.to_string_lossy()));
}

#[cfg(unix)]
#[test]
fn test_unresolvable_command_keeps_bare_name() {
    let adapter = PlatformAdapter::native();
    assert_eq!(
        adapter.executable_path("aiterm-definitely-not-a-command-7f3a"),
        PathBuf::from("aiterm-definitely-not-a-command-7f3a")
    );
}
