use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or persisting a keybind file.
#[derive(Debug, Error)]
pub enum KeybindsError {
    /// The keybind file does not exist.
    #[error("keybind file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file could not be opened, read, or written.
    #[error("I/O error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file parsed, but contains no `##` section to edit.
    #[error("no sections found in {}, nothing to edit", path.display())]
    NoSections { path: PathBuf },
}

impl KeybindsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
