//! Core data models for aiterm
//!
//! Plain data types shared by the platform layer and the terminal manager:
//! terminal types, lifecycle states, launch configuration and process
//! snapshots.

pub mod process_info;
pub mod terminal_config;
pub mod terminal_status;
pub mod terminal_type;

// Re-exports for convenience
pub use process_info::ProcessInfo;
pub use terminal_config::TerminalConfig;
pub use terminal_status::TerminalStatus;
pub use terminal_type::TerminalType;
