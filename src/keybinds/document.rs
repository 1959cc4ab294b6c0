//! In-memory model of a keybind file.

use std::fmt::Display;

use crate::keybinds::line::{LineKind, classify, is_blank};

/// A `##`-headed group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: String,
    pub entries: Vec<String>,
}

impl Section {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            entries: Vec::new(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.extend(entries.into_iter().map(Into::into));
        self
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header)
    }
}

/// Result of applying an edit to a [`KeybindDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Added,
    Replaced,
    Removed,
    /// Blank input or an out-of-range index; nothing changed.
    Unchanged,
    /// The text starts with the section marker and would be read back as a
    /// header; nothing changed.
    HeaderText,
}

impl EditOutcome {
    /// Returns true if the document was modified.
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged | Self::HeaderText)
    }
}

fn is_header(text: &str) -> bool {
    matches!(classify(text), LineKind::Header(_))
}

/// Parsed keybind file: the raw preamble followed by ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeybindDocument {
    /// Lines before the first section header, terminators included.
    pub preamble: Vec<String>,
    pub sections: Vec<Section>,
}

impl KeybindDocument {
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn entry(&self, section: usize, entry: usize) -> Option<&str> {
        self.section(section)
            .and_then(|s| s.entries.get(entry))
            .map(String::as_str)
    }

    /// Total number of entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Append `text` (trimmed) to the end of a section.
    pub fn add_entry(&mut self, section: usize, text: &str) -> EditOutcome {
        if is_blank(text) {
            return EditOutcome::Unchanged;
        }
        let Some(section) = self.sections.get_mut(section) else {
            return EditOutcome::Unchanged;
        };
        if is_header(text) {
            return EditOutcome::HeaderText;
        }
        section.entries.push(text.trim().to_string());
        EditOutcome::Added
    }

    /// Replace an entry in place. Blank text removes the entry instead.
    pub fn replace_entry(&mut self, section: usize, entry: usize, text: &str) -> EditOutcome {
        let Some(slot) = self
            .sections
            .get_mut(section)
            .and_then(|s| s.entries.get_mut(entry))
        else {
            return EditOutcome::Unchanged;
        };
        if is_blank(text) {
            return self.remove_entry(section, entry);
        }
        if is_header(text) {
            return EditOutcome::HeaderText;
        }
        *slot = text.trim().to_string();
        EditOutcome::Replaced
    }

    /// Remove an entry; later entries shift down by one.
    pub fn remove_entry(&mut self, section: usize, entry: usize) -> EditOutcome {
        match self.sections.get_mut(section) {
            Some(s) if entry < s.entries.len() => {
                s.entries.remove(entry);
                EditOutcome::Removed
            }
            _ => EditOutcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KeybindDocument {
        KeybindDocument {
            preamble: vec!["# comment preamble\n".to_string()],
            sections: vec![
                Section::new("General").with_entries([
                    "bind = SUPER, Q, killactive",
                    "bind = SUPER, F, fullscreen",
                    "bind = SUPER, V, togglefloating",
                ]),
                Section::new("Media").with_entries(["bindl = , XF86AudioMute, exec, pamixer -t"]),
            ],
        }
    }

    #[test]
    fn test_add_entry_appends_trimmed() {
        let mut doc = sample();
        let outcome = doc.add_entry(1, "  bindl = , XF86AudioPlay, exec, playerctl play-pause \n");

        assert_eq!(outcome, EditOutcome::Added);
        assert_eq!(
            doc.sections[1].entries.last().map(String::as_str),
            Some("bindl = , XF86AudioPlay, exec, playerctl play-pause")
        );
        assert_eq!(doc.sections[1].entries.len(), 2);
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut doc = sample();
        assert_eq!(doc.add_entry(0, " \t "), EditOutcome::Unchanged);
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_add_out_of_range_is_noop() {
        let mut doc = sample();
        assert_eq!(doc.add_entry(5, "bind = SUPER, X, exec, foo"), EditOutcome::Unchanged);
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut doc = sample();
        let outcome = doc.replace_entry(0, 1, " bind = SUPER, F, fullscreen, 1 ");

        assert_eq!(outcome, EditOutcome::Replaced);
        assert_eq!(
            doc.sections[0].entries,
            vec![
                "bind = SUPER, Q, killactive",
                "bind = SUPER, F, fullscreen, 1",
                "bind = SUPER, V, togglefloating",
            ]
        );
    }

    #[test]
    fn test_replace_with_blank_removes() {
        let mut doc = sample();
        let before = doc.sections[0].entries.len();

        assert_eq!(doc.replace_entry(0, 0, "   "), EditOutcome::Removed);
        assert_eq!(doc.sections[0].entries.len(), before - 1);
        assert_eq!(doc.entry(0, 0), Some("bind = SUPER, F, fullscreen"));
    }

    #[test]
    fn test_replace_out_of_range_is_noop() {
        let mut doc = sample();
        assert_eq!(doc.replace_entry(0, 3, "bind = x"), EditOutcome::Unchanged);
        assert_eq!(doc.replace_entry(2, 0, "bind = x"), EditOutcome::Unchanged);
        assert_eq!(doc.replace_entry(0, 3, ""), EditOutcome::Unchanged);
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_remove_shifts_following_entries() {
        let mut doc = sample();
        let next = doc.entry(0, 1).map(str::to_string);

        assert_eq!(doc.remove_entry(0, 0), EditOutcome::Removed);
        assert_eq!(doc.entry(0, 0).map(str::to_string), next);
        assert_eq!(doc.entry_count(), 3);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut doc = sample();
        assert_eq!(doc.remove_entry(1, 1), EditOutcome::Unchanged);
        assert_eq!(doc.remove_entry(9, 0), EditOutcome::Unchanged);
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_marker_entry_rejected() {
        let mut doc = sample();

        assert_eq!(doc.add_entry(0, "## oops"), EditOutcome::HeaderText);
        assert_eq!(doc.add_entry(1, "   ##Media2 "), EditOutcome::HeaderText);
        assert_eq!(doc.replace_entry(0, 1, "## Windows"), EditOutcome::HeaderText);
        assert!(!EditOutcome::HeaderText.is_change());
        assert_eq!(doc, sample());

        // a marker later in the line is fine
        assert_eq!(doc.add_entry(0, "bind = SUPER, H, exec, echo ##"), EditOutcome::Added);
    }

    #[test]
    fn test_preamble_untouched_by_edits() {
        let mut doc = sample();
        doc.add_entry(0, "bind = SUPER, T, exec, kitty");
        doc.replace_entry(0, 0, "bind = SUPER, C, killactive");
        doc.remove_entry(1, 0);
        assert_eq!(doc.preamble, sample().preamble);
    }
}
