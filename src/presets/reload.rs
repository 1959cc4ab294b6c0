//! Notifying Waybar after a preset has been applied.

use std::path::PathBuf;

use tracing::{debug, warn};

/// Side effect run after a preset has been copied into place.
///
/// Implementations must not block on the reload finishing. Only a failure
/// to start the reload is reported back.
pub trait Reloader {
    /// Kick off the reload.
    ///
    /// # Errors
    /// Returns the error if the reload could not be started.
    fn reload(&self) -> std::io::Result<()>;
}

/// Runs a reload script in the background without waiting for it.
#[derive(Debug, Clone)]
pub struct ScriptReloader {
    script: PathBuf,
}

impl ScriptReloader {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl Reloader for ScriptReloader {
    fn reload(&self) -> std::io::Result<()> {
        match tokio::process::Command::new(&self.script)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
        {
            Ok(child) => {
                debug!("Spawned reload script {:?} (pid {:?})", self.script, child.id());
                Ok(())
            }
            Err(e) => {
                warn!("Failed to run reload script {:?}: {}", self.script, e);
                Err(e)
            }
        }
    }
}
