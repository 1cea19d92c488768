//! Terminal Lifecycle Management
//!
//! Sessions, the registry that names them, and the manager that drives their
//! state machine:
//!
//! ```text
//! Stopped -> Starting -> Running -> Stopping -> Stopped
//! ```
//!
//! Spawn and kill failures park a session in `Error`.

pub mod manager;
pub mod registry;
pub mod session;
pub mod spawn;

// Re-exports for convenience
pub use manager::TerminalManager;
pub use registry::SessionRegistry;
pub use session::{Session, TerminalSnapshot};
pub use spawn::spawn_with_timeout;
