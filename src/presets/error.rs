use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by preset operations.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The preset name is blank or would escape the presets directory.
    #[error("invalid preset name: {0:?}")]
    InvalidName(String),

    /// No preset with this name exists.
    #[error("preset not found: {0}")]
    NotFound(String),

    /// The directory to snapshot does not exist.
    #[error("source directory does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    /// A file system operation failed.
    #[error("I/O error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PresetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
