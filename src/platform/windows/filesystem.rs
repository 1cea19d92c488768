//! Windows executable resolution

use std::env;
use std::path::{Path, PathBuf};

/// Suffixes probed in priority order
pub const EXECUTABLE_SUFFIXES: [&str; 5] = ["", ".exe", ".cmd", ".bat", ".com"];

/// Find a single file name in PATH
fn find_in_path(file_name: &str) -> Option<PathBuf> {
    let candidate = Path::new(file_name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_env = env::var_os("PATH")?;
    env::split_paths(&path_env)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(file_name))
        .find(|full_path| full_path.is_file())
}

/// Probe each suffix against PATH; the first hit wins
pub fn find_command(command: &str) -> Option<PathBuf> {
    if command.is_empty() {
        return None;
    }

    EXECUTABLE_SUFFIXES
        .iter()
        .find_map(|ext| find_in_path(&format!("{}{}", command, ext)))
}

/// Resolve a command, falling back to `<command>.exe`
pub fn executable_path(command: &str) -> PathBuf {
    match find_command(command) {
        Some(path) => {
            debug!("Resolved '{}' to {}", command, path.display());
            path
        }
        None => {
            debug!("'{}' not found in PATH, assuming '{}.exe'", command, command);
            PathBuf::from(format!("{}.exe", command))
        }
    }
}

/// Absolute paths are checked by stat, bare names by PATH lookup
pub fn validate_command(command: &str) -> bool {
    let path = Path::new(command);
    if path.is_absolute() {
        return path.metadata().is_ok();
    }
    find_command(command).is_some()
}
