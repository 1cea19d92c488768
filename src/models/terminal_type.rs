//! Terminal Type Definitions
//!
//! Canonical list of the AI command-line tools aiterm knows how to launch,
//! together with their executable names and confirmation-bypass flags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Which AI CLI a terminal session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TerminalType {
    /// Anthropic Claude Code (`claude`)
    #[default]
    ClaudeCode,
    /// Google Gemini CLI (`gemini`)
    GeminiCli,
    /// Cursor in CLI mode (`cursor --cli`)
    Cursor,
    /// Aider (`aider`)
    Aider,
    /// OpenAI Codex CLI (`codex`)
    Codex,
    /// Caller-chosen program, or the platform shell
    Custom,
}

impl TerminalType {
    /// All known terminal types, in display order
    pub const ALL: [TerminalType; 6] = [
        TerminalType::ClaudeCode,
        TerminalType::GeminiCli,
        TerminalType::Cursor,
        TerminalType::Aider,
        TerminalType::Codex,
        TerminalType::Custom,
    ];

    /// Get a string representation of the terminal type
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalType::ClaudeCode => "claude",
            TerminalType::GeminiCli => "gemini",
            TerminalType::Cursor => "cursor",
            TerminalType::Aider => "aider",
            TerminalType::Codex => "codex",
            TerminalType::Custom => "custom",
        }
    }

    /// Executable name for built-in tools; `None` for `Custom`
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            TerminalType::ClaudeCode => Some("claude"),
            TerminalType::GeminiCli => Some("gemini"),
            TerminalType::Cursor => Some("cursor"),
            TerminalType::Aider => Some("aider"),
            TerminalType::Codex => Some("codex"),
            TerminalType::Custom => None,
        }
    }

    /// Arguments that always follow the executable
    pub fn base_args(&self) -> &'static [&'static str] {
        match self {
            TerminalType::Cursor => &["--cli"],
            _ => &[],
        }
    }

    /// Flag that skips interactive confirmations ("YOLO mode"), if the tool has one
    pub fn yolo_flag(&self) -> Option<&'static str> {
        match self {
            TerminalType::ClaudeCode => Some("--dangerously-skip-permissions"),
            TerminalType::GeminiCli => Some("--yolo"),
            TerminalType::Codex => Some("--dangerously-bypass-approvals-and-sandbox"),
            TerminalType::Aider => Some("--yes"),
            TerminalType::Cursor | TerminalType::Custom => None,
        }
    }

    /// Human readable name for list displays
    pub fn display_name(&self) -> &'static str {
        match self {
            TerminalType::ClaudeCode => "Claude Code",
            TerminalType::GeminiCli => "Gemini CLI",
            TerminalType::Cursor => "Cursor",
            TerminalType::Aider => "Aider",
            TerminalType::Codex => "Codex",
            TerminalType::Custom => "Custom",
        }
    }
}

impl fmt::Display for TerminalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminalType {
    type Err = Error;

    /// Parse a terminal type (case-insensitive, accepts a few aliases)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "claude-code" | "claude_code" | "claudecode" => Ok(TerminalType::ClaudeCode),
            "gemini" | "gemini-cli" | "gemini_cli" | "geminicli" => Ok(TerminalType::GeminiCli),
            "cursor" => Ok(TerminalType::Cursor),
            "aider" => Ok(TerminalType::Aider),
            "codex" => Ok(TerminalType::Codex),
            "custom" => Ok(TerminalType::Custom),
            other => Err(Error::UnsupportedType {
                terminal_type: other.to_string(),
                reason: "unknown terminal type".to_string(),
            }),
        }
    }
}
