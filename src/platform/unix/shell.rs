//! Unix shell selection

use std::path::{Path, PathBuf};

/// Shells in order of preference
pub const SHELL_CANDIDATES: [&str; 2] = ["/bin/bash", "/bin/sh"];

/// First existing candidate; `/bin/sh` if none exist
pub fn default_shell() -> PathBuf {
    SHELL_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.metadata().is_ok())
        .unwrap_or_else(|| PathBuf::from("/bin/sh"))
}

/// Shells read commands from a piped stdin without extra flags
pub fn shell_args(_shell: &Path) -> Vec<String> {
    Vec::new()
}
