use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::presets::error::PresetError;
use crate::presets::fs::{copy_dir_recursive, empty_dir, remove_dir_recursive};
use crate::presets::reload::Reloader;

/// Named snapshots of a live config directory.
///
/// Each preset is a sub-directory of `presets_dir` holding a full copy of
/// `live_dir` at the time it was saved.
pub struct PresetStore {
    presets_dir: PathBuf,
    live_dir: PathBuf,
    reloader: Box<dyn Reloader>,
}

/// What happened when a preset was applied.
#[derive(Debug)]
pub struct Applied {
    pub name: String,
    /// Set when the files were copied but the reload could not be started.
    pub reload_error: Option<std::io::Error>,
}

impl PresetStore {
    pub fn new(
        presets_dir: impl Into<PathBuf>,
        live_dir: impl Into<PathBuf>,
        reloader: Box<dyn Reloader>,
    ) -> Self {
        Self {
            presets_dir: presets_dir.into(),
            live_dir: live_dir.into(),
            reloader,
        }
    }

    pub fn presets_dir(&self) -> &Path {
        &self.presets_dir
    }

    pub fn live_dir(&self) -> &Path {
        &self.live_dir
    }

    /// List preset names sorted alphabetically, creating the presets
    /// directory if it does not exist yet.
    ///
    /// # Errors
    /// Fails if the presets directory cannot be created or read.
    pub fn list(&self) -> Result<Vec<String>, PresetError> {
        let dir = &self.presets_dir;
        fs::create_dir_all(dir).map_err(|e| PresetError::io(dir, e))?;

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| PresetError::io(dir, e))? {
            let entry = entry.map_err(|e| PresetError::io(dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => warn!("Skipping preset with non UTF-8 name: {:?}", name),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Snapshot the live directory as `name`. Files of an existing preset
    /// with the same name are overwritten.
    ///
    /// # Errors
    /// Fails on an invalid name, a missing live directory, or I/O errors.
    pub fn save(&self, name: &str) -> Result<String, PresetError> {
        let name = validate_name(name)?;
        let target = self.presets_dir.join(&name);
        copy_dir_recursive(&self.live_dir, &target)?;
        info!("Saved preset {:?} from {:?}", name, self.live_dir);
        Ok(name)
    }

    /// Replace the live directory's contents with the preset and trigger a
    /// reload. The live directory is only emptied once the preset is known
    /// to exist.
    ///
    /// # Errors
    /// Fails if the preset does not exist or copying fails. A reload that
    /// cannot be started is reported in [`Applied::reload_error`] instead.
    pub fn apply(&self, name: &str) -> Result<Applied, PresetError> {
        let name = validate_name(name)?;
        let source = self.presets_dir.join(&name);
        if !source.is_dir() {
            return Err(PresetError::NotFound(name));
        }

        empty_dir(&self.live_dir)?;
        copy_dir_recursive(&source, &self.live_dir)?;
        info!("Applied preset {:?} to {:?}", name, self.live_dir);

        let reload_error = self.reloader.reload().err();
        Ok(Applied { name, reload_error })
    }

    /// Delete a preset. Deleting a preset that does not exist succeeds.
    ///
    /// # Errors
    /// Fails on an invalid name or if the directory cannot be removed.
    pub fn delete(&self, name: &str) -> Result<(), PresetError> {
        let name = validate_name(name)?;
        remove_dir_recursive(&self.presets_dir.join(&name))?;
        info!("Deleted preset {:?}", name);
        Ok(())
    }
}

/// Trim a preset name and reject names that are blank or not a single
/// path component.
fn validate_name(name: &str) -> Result<String, PresetError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
        || trimmed.contains('\0');
    if invalid {
        return Err(PresetError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingReloader {
        calls: Rc<Cell<usize>>,
        fail: bool,
    }

    impl Reloader for CountingReloader {
        fn reload(&self) -> std::io::Result<()> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no script"))
            } else {
                Ok(())
            }
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        store: PresetStore,
        calls: Rc<Cell<usize>>,
    }

    fn fixture(fail_reload: bool) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let store = PresetStore::new(
            dir.path().join("presets"),
            dir.path().join("waybar"),
            Box::new(CountingReloader {
                calls: Rc::clone(&calls),
                fail: fail_reload,
            }),
        );
        Fixture {
            _dir: dir,
            store,
            calls,
        }
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_list_creates_directory_and_sorts() {
        let f = fixture(false);
        assert!(f.store.list().unwrap().is_empty());
        assert!(f.store.presets_dir().is_dir());

        fs::create_dir(f.store.presets_dir().join("minimal")).unwrap();
        fs::create_dir(f.store.presets_dir().join("colorful")).unwrap();
        write(&f.store.presets_dir().join("notes.txt"), "not a preset");

        assert_eq!(f.store.list().unwrap(), vec!["colorful", "minimal"]);
    }

    #[test]
    fn test_save_snapshots_live_dir() {
        let f = fixture(false);
        write(&f.store.live_dir().join("config.jsonc"), "{\"layer\": \"top\"}");
        write(&f.store.live_dir().join("modules/clock.json"), "{}");

        assert_eq!(f.store.save("  minimal  ").unwrap(), "minimal");

        let preset = f.store.presets_dir().join("minimal");
        assert_eq!(
            fs::read_to_string(preset.join("config.jsonc")).unwrap(),
            "{\"layer\": \"top\"}"
        );
        assert!(preset.join("modules/clock.json").exists());
        assert_eq!(f.store.list().unwrap(), vec!["minimal"]);
    }

    #[test]
    fn test_save_without_live_dir() {
        let f = fixture(false);
        let err = f.store.save("minimal").unwrap_err();
        assert!(matches!(err, PresetError::MissingSource(_)));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let f = fixture(false);
        write(&f.store.live_dir().join("config.jsonc"), "{}");

        for name in ["", "   ", ".", "..", "../escape", "a/b", "a\\b"] {
            let err = f.store.save(name).unwrap_err();
            assert!(matches!(err, PresetError::InvalidName(_)), "name: {name:?}");
        }
        assert!(f.store.list().unwrap().is_empty());
    }

    #[test]
    fn test_apply_replaces_live_dir_and_reloads() {
        let f = fixture(false);
        write(&f.store.presets_dir().join("minimal/config.jsonc"), "minimal");
        write(&f.store.live_dir().join("config.jsonc"), "current");
        write(&f.store.live_dir().join("stale.css"), "stale");

        let applied = f.store.apply("minimal").unwrap();

        assert_eq!(applied.name, "minimal");
        assert!(applied.reload_error.is_none());
        assert_eq!(
            fs::read_to_string(f.store.live_dir().join("config.jsonc")).unwrap(),
            "minimal"
        );
        assert!(!f.store.live_dir().join("stale.css").exists());
        assert_eq!(f.calls.get(), 1);
    }

    #[test]
    fn test_apply_missing_preset_leaves_live_dir() {
        let f = fixture(false);
        write(&f.store.live_dir().join("config.jsonc"), "current");

        let err = f.store.apply("ghost").unwrap_err();

        assert!(matches!(err, PresetError::NotFound(_)));
        assert!(f.store.live_dir().join("config.jsonc").exists());
        assert_eq!(f.calls.get(), 0);
    }

    #[test]
    fn test_apply_reports_reload_failure() {
        let f = fixture(true);
        write(&f.store.presets_dir().join("minimal/config.jsonc"), "minimal");

        let applied = f.store.apply("minimal").unwrap();

        assert!(applied.reload_error.is_some());
        assert!(f.store.live_dir().join("config.jsonc").exists());
    }

    #[test]
    fn test_delete() {
        let f = fixture(false);
        write(&f.store.presets_dir().join("minimal/config.jsonc"), "minimal");

        f.store.delete("minimal").unwrap();
        assert!(f.store.list().unwrap().is_empty());

        // deleting again is fine
        f.store.delete("minimal").unwrap();
    }

    #[test]
    fn test_save_then_apply_round_trip() {
        let f = fixture(false);
        write(&f.store.live_dir().join("config.jsonc"), "original");
        f.store.save("backup").unwrap();

        write(&f.store.live_dir().join("config.jsonc"), "changed");
        f.store.apply("backup").unwrap();

        assert_eq!(
            fs::read_to_string(f.store.live_dir().join("config.jsonc")).unwrap(),
            "original"
        );
    }
}
