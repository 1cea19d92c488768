//! Bounded process spawning
//!
//! Process creation runs on the blocking pool and is raced against a timeout.
//! When the timeout wins, a reaper task waits for the in-flight spawn and
//! kills whatever it produced.

use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Child;

use crate::error::{Error, Result};
use crate::platform::CommandSpec;

/// Creates the OS process described by a `CommandSpec`; runs on the blocking pool
pub(crate) type Spawner = Arc<dyn Fn(&CommandSpec) -> io::Result<Child> + Send + Sync>;

/// The real spawner: `CommandSpec::to_command` then `spawn`
pub(crate) fn os_spawner() -> Spawner {
    Arc::new(|spec: &CommandSpec| spec.to_command().spawn())
}

/// Spawn `spec` for the session `name`, giving up after `limit`
pub async fn spawn_with_timeout(name: &str, spec: &CommandSpec, limit: Duration) -> Result<Child> {
    spawn_using(os_spawner(), name, spec, limit).await
}

/// Like [`spawn_with_timeout`] with an explicit spawner
pub(crate) async fn spawn_using(
    spawner: Spawner,
    name: &str,
    spec: &CommandSpec,
    limit: Duration,
) -> Result<Child> {
    let owned = spec.clone();
    race_spawn(name, &spec.to_string(), limit, move || spawner(&owned)).await
}

/// Run `spawn` on the blocking pool and race it against `limit`
pub(crate) async fn race_spawn<F>(
    name: &str,
    command_line: &str,
    limit: Duration,
    spawn: F,
) -> Result<Child>
where
    F: FnOnce() -> io::Result<Child> + Send + 'static,
{
    let mut handle = tokio::task::spawn_blocking(spawn);

    match tokio::time::timeout(limit, &mut handle).await {
        Ok(Ok(Ok(child))) => Ok(child),
        Ok(Ok(Err(e))) => Err(Error::SpawnFailure {
            name: name.to_string(),
            command: command_line.to_string(),
            reason: e.to_string(),
        }),
        Ok(Err(join_err)) => Err(Error::SpawnFailure {
            name: name.to_string(),
            command: command_line.to_string(),
            reason: format!("spawn task failed: {}", join_err),
        }),
        Err(_) => {
            warn!(
                "Spawning terminal '{}' ({}) exceeded {:?}",
                name, command_line, limit
            );
            let label = name.to_string();
            tokio::spawn(async move {
                if let Ok(Ok(mut child)) = handle.await {
                    debug!("Reaping late process {:?} for '{}'", child.id(), label);
                    if let Err(e) = child.kill().await {
                        warn!("Failed to reap late process for '{}': {}", label, e);
                    }
                }
            });
            Err(Error::SpawnTimeout {
                name: name.to_string(),
                command: command_line.to_string(),
                timeout: limit,
            })
        }
    }
}
