//! Windows shell selection

use std::path::{Path, PathBuf};

use super::filesystem;

/// PowerShell when it resolves on PATH, otherwise `cmd.exe`
pub fn default_shell() -> PathBuf {
    if filesystem::validate_command("powershell.exe") {
        PathBuf::from("powershell.exe")
    } else {
        PathBuf::from("cmd.exe")
    }
}

/// PowerShell only reads a script from stdin when told to
pub fn shell_args(shell: &Path) -> Vec<String> {
    let is_powershell = shell
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("powershell") || s.eq_ignore_ascii_case("pwsh"))
        .unwrap_or(false);

    if is_powershell {
        ["-NoLogo", "-NoProfile", "-Command", "-"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        Vec::new()
    }
}
