//! Unix executable resolution

use std::env;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Check if a file is executable
pub fn is_executable(path: &Path) -> bool {
    if let Ok(metadata) = path.metadata() {
        if metadata.is_file() {
            return (metadata.permissions().mode() & 0o111) != 0;
        }
    }
    false
}

/// Find a command in PATH
///
/// Names containing a slash are checked directly and never searched.
pub fn find_command(command: &str) -> Option<PathBuf> {
    if command.is_empty() {
        return None;
    }

    if command.contains('/') {
        let path = PathBuf::from(command);
        return is_executable(&path).then_some(path);
    }

    let path_env = env::var_os("PATH")?;
    env::split_paths(&path_env)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(command))
        .find(|candidate| is_executable(candidate))
}

/// Resolve a command, falling back to the bare name so the OS can try at spawn time
pub fn executable_path(command: &str) -> PathBuf {
    match find_command(command) {
        Some(path) => {
            debug!("Resolved '{}' to {}", command, path.display());
            path
        }
        None => {
            debug!("'{}' not found in PATH, leaving it to spawn-time lookup", command);
            PathBuf::from(command)
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
