//! Recursive directory helpers used by the preset store.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::presets::error::PresetError;

/// Copy the contents of `src` into `dest`, creating `dest` as needed.
///
/// Existing files in `dest` are overwritten; files only present in `dest`
/// are left alone. Failures on individual files are logged and skipped so
/// one unreadable file does not abort the snapshot.
///
/// # Errors
/// Fails if `src` does not exist or a directory cannot be created or listed.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), PresetError> {
    if !src.is_dir() {
        return Err(PresetError::MissingSource(src.to_path_buf()));
    }
    fs::create_dir_all(dest).map_err(|e| PresetError::io(dest, e))?;

    for entry in fs::read_dir(src).map_err(|e| PresetError::io(src, e))? {
        let entry = entry.map_err(|e| PresetError::io(src, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());

        if from.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else if let Err(e) = fs::copy(&from, &to) {
            warn!("Failed to copy {:?} to {:?}: {}", from, to, e);
        }
    }
    Ok(())
}

/// Remove `path` and everything below it. A missing path is not an error.
///
/// # Errors
/// Fails if the tree exists but cannot be removed.
pub fn remove_dir_recursive(path: &Path) -> Result<(), PresetError> {
    match fs::symlink_metadata(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PresetError::io(path, e)),
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).map_err(|e| PresetError::io(path, e))
        }
        Ok(_) => fs::remove_file(path).map_err(|e| PresetError::io(path, e)),
    }
}

/// Delete everything inside `path` but keep the directory itself.
/// The directory is created if it does not exist yet.
///
/// # Errors
/// Fails if the directory cannot be created, listed, or a child removed.
pub fn empty_dir(path: &Path) -> Result<(), PresetError> {
    fs::create_dir_all(path).map_err(|e| PresetError::io(path, e))?;
    for entry in fs::read_dir(path).map_err(|e| PresetError::io(path, e))? {
        let entry = entry.map_err(|e| PresetError::io(path, e))?;
        remove_dir_recursive(&entry.path())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_copy_dir_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        write(&src.join("config.jsonc"), "{}");
        write(&src.join("style.css"), "* {}");
        write(&src.join("scripts/nested/run.sh"), "echo hi");

        let dest = dir.path().join("dest");
        copy_dir_recursive(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("config.jsonc")).unwrap(), "{}");
        assert_eq!(fs::read_to_string(dest.join("style.css")).unwrap(), "* {}");
        assert_eq!(
            fs::read_to_string(dest.join("scripts/nested/run.sh")).unwrap(),
            "echo hi"
        );
    }

    #[test]
    fn test_copy_overwrites_and_keeps_extra_files() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");
        write(&src.join("config.jsonc"), "new");
        write(&dest.join("config.jsonc"), "old");
        write(&dest.join("extra.css"), "extra");

        copy_dir_recursive(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("config.jsonc")).unwrap(), "new");
        assert!(dest.join("extra.css").exists());
    }

    #[test]
    fn test_copy_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_dir_recursive(&dir.path().join("nope"), &dir.path().join("dest")).unwrap_err();

        assert!(matches!(err, PresetError::MissingSource(_)));
        assert!(!dir.path().join("dest").exists());
    }

    #[test]
    fn test_remove_dir_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("preset");
        write(&target.join("a/b/c.txt"), "x");

        remove_dir_recursive(&target).unwrap();
        assert!(!target.exists());

        // second removal is a no-op
        remove_dir_recursive(&target).unwrap();
    }

    #[test]
    fn test_empty_dir_keeps_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("waybar");
        write(&target.join("config.jsonc"), "{}");
        write(&target.join("modules/clock.json"), "{}");

        empty_dir(&target).unwrap();

        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_dir_creates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("waybar");

        empty_dir(&target).unwrap();
        assert!(target.is_dir());
    }
}
