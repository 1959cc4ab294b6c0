use std::path::{Path, PathBuf};

use tracing::info;

use crate::keybinds::document::{EditOutcome, KeybindDocument};
use crate::keybinds::error::KeybindsError;
use crate::keybinds::{parser, writer};

/// A keybind file opened for editing.
///
/// Every edit that changes the document rewrites the whole file. The
/// in-memory document stays authoritative afterwards; the file is never
/// read back after a write.
#[derive(Debug)]
pub struct KeybindEditor {
    path: PathBuf,
    document: KeybindDocument,
}

impl KeybindEditor {
    /// Parse `path` and open it for editing.
    ///
    /// # Errors
    /// Fails if the file cannot be read, or with [`KeybindsError::NoSections`]
    /// if it has no section an entry could be added to.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, KeybindsError> {
        let path = path.into();
        let document = parser::parse_file(&path)?;
        if document.sections.is_empty() {
            return Err(KeybindsError::NoSections { path });
        }
        info!(
            "Opened {:?} with {} sections",
            path,
            document.sections.len()
        );
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn document(&self) -> &KeybindDocument {
        &self.document
    }

    /// Re-parse the file, replacing the in-memory document wholesale.
    ///
    /// # Errors
    /// On failure the current document is kept.
    pub fn reload(&mut self) -> Result<(), KeybindsError> {
        let document = parser::parse_file(&self.path)?;
        if document.sections.is_empty() {
            return Err(KeybindsError::NoSections {
                path: self.path.clone(),
            });
        }
        self.document = document;
        Ok(())
    }

    /// Append an entry to a section and persist.
    ///
    /// # Errors
    /// Returns an error only if persisting fails.
    pub fn add_entry(&mut self, section: usize, text: &str) -> Result<EditOutcome, KeybindsError> {
        let outcome = self.document.add_entry(section, text);
        self.persist(outcome)
    }

    /// Replace an entry in place and persist. Blank text deletes the entry.
    ///
    /// # Errors
    /// Returns an error only if persisting fails.
    pub fn replace_entry(
        &mut self,
        section: usize,
        entry: usize,
        text: &str,
    ) -> Result<EditOutcome, KeybindsError> {
        let outcome = self.document.replace_entry(section, entry, text);
        self.persist(outcome)
    }

    /// Delete an entry and persist.
    ///
    /// # Errors
    /// Returns an error only if persisting fails.
    pub fn delete_entry(
        &mut self,
        section: usize,
        entry: usize,
    ) -> Result<EditOutcome, KeybindsError> {
        let outcome = self.document.remove_entry(section, entry);
        self.persist(outcome)
    }

    fn persist(&self, outcome: EditOutcome) -> Result<EditOutcome, KeybindsError> {
        if outcome.is_change() {
            writer::write_file(&self.path, &self.document)?;
            info!("{:?} keybind entry in {:?}", outcome, self.path);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SCENARIO: &str = "# comment preamble
## General
bind = SUPER, Q, killactive
bind = SUPER, F, fullscreen

## Media
bindl = , XF86AudioMute, exec, pamixer -t
";

    fn setup(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybinds.conf");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_open_scenario() {
        let (_dir, path) = setup(SCENARIO);
        let editor = KeybindEditor::open(&path).unwrap();

        assert_eq!(editor.path(), path);
        assert_eq!(editor.document().sections.len(), 2);
        assert_eq!(editor.document().entry_count(), 3);
    }

    #[test]
    fn test_open_without_sections_is_refused() {
        let (_dir, path) = setup("$mainMod = SUPER\nbind = SUPER, Q, killactive\n");
        let err = KeybindEditor::open(&path).unwrap_err();
        assert!(matches!(err, KeybindsError::NoSections { .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = KeybindEditor::open(dir.path().join("missing.conf")).unwrap_err();
        assert!(matches!(err, KeybindsError::NotFound { .. }));
    }

    #[test]
    fn test_delete_persists_scenario() {
        let (_dir, path) = setup(SCENARIO);
        let mut editor = KeybindEditor::open(&path).unwrap();

        assert_eq!(editor.delete_entry(0, 0).unwrap(), EditOutcome::Removed);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "# comment preamble\n## General\nbind = SUPER, F, fullscreen\n## Media\nbindl = , XF86AudioMute, exec, pamixer -t\n"
        );
    }

    #[test]
    fn test_add_persists_at_end_of_section() {
        let (_dir, path) = setup(SCENARIO);
        let mut editor = KeybindEditor::open(&path).unwrap();

        editor.add_entry(0, "  bind = SUPER, T, exec, kitty ").unwrap();

        let reparsed = parser::parse_file(&path).unwrap();
        assert_eq!(
            reparsed.sections[0].entries.last().map(String::as_str),
            Some("bind = SUPER, T, exec, kitty")
        );
        assert_eq!(&reparsed, editor.document());
    }

    #[test]
    fn test_replace_blank_deletes_and_persists() {
        let (_dir, path) = setup(SCENARIO);
        let mut editor = KeybindEditor::open(&path).unwrap();

        assert_eq!(editor.replace_entry(1, 0, " \t").unwrap(), EditOutcome::Removed);
        assert!(editor.document().sections[1].entries.is_empty());
        assert!(fs::read_to_string(&path).unwrap().ends_with("## Media\n"));
    }

    #[test]
    fn test_noop_edits_do_not_touch_file() {
        let (_dir, path) = setup(SCENARIO);
        let mut editor = KeybindEditor::open(&path).unwrap();

        assert_eq!(editor.add_entry(0, "   ").unwrap(), EditOutcome::Unchanged);
        assert_eq!(editor.add_entry(7, "bind = x").unwrap(), EditOutcome::Unchanged);
        assert_eq!(editor.replace_entry(0, 2, "bind = x").unwrap(), EditOutcome::Unchanged);
        assert_eq!(editor.delete_entry(1, 1).unwrap(), EditOutcome::Unchanged);

        // the blank line inside General survives because nothing was rewritten
        assert_eq!(fs::read_to_string(&path).unwrap(), SCENARIO);
    }

    #[test]
    fn test_marker_text_keeps_file_and_model_in_sync() {
        let (_dir, path) = setup("## General\nbind = a\n## Media\nbind = b\n");
        let mut editor = KeybindEditor::open(&path).unwrap();

        assert_eq!(editor.add_entry(0, "## oops").unwrap(), EditOutcome::HeaderText);
        assert_eq!(editor.replace_entry(1, 0, "  ##Other").unwrap(), EditOutcome::HeaderText);

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "## General\nbind = a\n## Media\nbind = b\n"
        );
        assert_eq!(editor.document().sections.len(), 2);
        assert_eq!(parser::parse_file(&path).unwrap(), *editor.document());

        editor.add_entry(0, "bind = c").unwrap();
        assert_eq!(parser::parse_file(&path).unwrap(), *editor.document());
    }

    #[test]
    fn test_edits_compound_on_memory_model() {
        let (_dir, path) = setup(SCENARIO);
        let mut editor = KeybindEditor::open(&path).unwrap();

        // an external change is not seen, the in-memory model wins on the next write
        fs::write(&path, "## Replaced\nbind = other\n").unwrap();
        editor.delete_entry(0, 1).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# comment preamble\n## General\nbind = SUPER, Q, killactive\n"));
        assert!(!written.contains("Replaced"));
    }

    #[test]
    fn test_reload_replaces_document() {
        let (_dir, path) = setup(SCENARIO);
        let mut editor = KeybindEditor::open(&path).unwrap();

        fs::write(&path, "## Only\nbind = SUPER, Q, killactive\n").unwrap();
        editor.reload().unwrap();

        assert_eq!(editor.document().sections.len(), 1);
        assert!(editor.document().preamble.is_empty());
    }

    #[test]
    fn test_reload_failure_keeps_document() {
        let (_dir, path) = setup(SCENARIO);
        let mut editor = KeybindEditor::open(&path).unwrap();
        let before = editor.document().clone();

        fs::write(&path, "no sections\n").unwrap();
        assert!(editor.reload().is_err());
        assert_eq!(editor.document(), &before);
    }
}
