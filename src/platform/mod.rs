//! Platform abstraction layer
//!
//! This module hides the differences between Unix and Windows process
//! control: shell selection, executable resolution, environment assembly,
//! process inspection and termination.
//!
//! The OS-specific half lives behind [`PlatformStrategy`]; the shared half
//! (command construction, environment merging) lives in [`PlatformAdapter`].

mod adapter;
mod command;
mod traits;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

use std::sync::Arc;

pub use adapter::{environment_overrides, PlatformAdapter, PLATFORM_ENV_VAR};
pub use command::CommandSpec;
pub use traits::*;

#[cfg(unix)]
pub use unix::UnixPlatform;
#[cfg(windows)]
pub use windows::WindowsPlatform;

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the strategy for the platform this binary was built for
    pub fn native() -> Arc<dyn PlatformStrategy> {
        #[cfg(unix)]
        {
            Arc::new(unix::UnixPlatform::new())
        }

        #[cfg(windows)]
        {
            Arc::new(windows::WindowsPlatform::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }
}
