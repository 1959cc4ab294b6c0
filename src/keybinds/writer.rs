//! Serialization of a [`KeybindDocument`] back to disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::keybinds::document::KeybindDocument;
use crate::keybinds::error::KeybindsError;
use crate::keybinds::line::{SECTION_MARKER, is_blank};

/// Render the document: preamble verbatim, then each section header and its
/// non-blank entries, one per line.
pub fn render(document: &KeybindDocument) -> String {
    let mut out = String::new();
    for line in &document.preamble {
        out.push_str(line);
    }
    for section in &document.sections {
        out.push_str(SECTION_MARKER);
        out.push(' ');
        out.push_str(&section.header);
        out.push('\n');
        for entry in section.entries.iter().filter(|e| !is_blank(e)) {
            out.push_str(entry);
            out.push('\n');
        }
    }
    out
}

/// Replace the file at `path` with the rendered document.
///
/// The content is written to a temporary file next to `path` and renamed
/// over it, so a failure leaves the previous file untouched. Permissions of
/// an existing file are carried over.
///
/// # Errors
/// Returns [`KeybindsError::Io`] if the temporary file cannot be created,
/// written, or renamed into place.
pub fn write_file(path: &Path, document: &KeybindDocument) -> Result<(), KeybindsError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_err = |e| KeybindsError::io(path, e);

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(render(document).as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;

    if let Ok(metadata) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(io_err)?;
    }

    tmp.persist(path).map_err(|e| io_err(e.error))?;
    debug!("Wrote {} sections to {:?}", document.sections.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinds::document::Section;
    use crate::keybinds::parser::parse_str;

    const SCENARIO: &str = "# comment preamble
## General
bind = SUPER, Q, killactive
bind = SUPER, F, fullscreen

## Media
bindl = , XF86AudioMute, exec, pamixer -t
";

    #[test]
    fn test_render_scenario_drops_blank_lines() {
        let rendered = render(&parse_str(SCENARIO));
        assert_eq!(
            rendered,
            "# comment preamble\n## General\nbind = SUPER, Q, killactive\nbind = SUPER, F, fullscreen\n## Media\nbindl = , XF86AudioMute, exec, pamixer -t\n"
        );
    }

    #[test]
    fn test_delete_first_general_entry() {
        let mut doc = parse_str(SCENARIO);
        doc.remove_entry(0, 0);

        let rendered = render(&doc);
        assert!(rendered.contains("## General\nbind = SUPER, F, fullscreen\n## Media\n"));
        assert!(!rendered.contains("killactive"));
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let inputs = [
            SCENARIO,
            "$mod = SUPER\r\n\n##General   \n\n  bind = a  \n##  Other\n\n\n",
            "no sections at all\n\n",
            "",
            "## Only\n",
        ];
        for input in inputs {
            let first = render(&parse_str(input));
            let second = render(&parse_str(&first));
            assert_eq!(first, second, "input: {input:?}");
        }
    }

    #[test]
    fn test_header_normalized_to_single_space() {
        assert_eq!(render(&parse_str("##General\n")), "## General\n");
        assert_eq!(render(&parse_str("  ##\tMedia \n")), "## Media\n");
    }

    #[test]
    fn test_preamble_round_trips_byte_for_byte() {
        let preamble = "# header\r\n\n  indented = 1   \n\t\n";
        let rendered = render(&parse_str(&format!("{preamble}## A\nbind = x\n")));
        assert!(rendered.starts_with(preamble));
    }

    #[test]
    fn test_blank_entries_in_memory_are_skipped() {
        let doc = KeybindDocument {
            preamble: vec![],
            sections: vec![Section::new("A").with_entries(["bind = 1", "   ", "", "bind = 2"])],
        };
        assert_eq!(render(&doc), "## A\nbind = 1\nbind = 2\n");
    }

    #[test]
    fn test_write_file_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybinds.conf");
        std::fs::write(&path, SCENARIO).unwrap();

        let mut doc = parse_str(SCENARIO);
        doc.add_entry(1, "bindl = , XF86AudioPlay, exec, playerctl play-pause");
        write_file(&path, &doc).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&doc));
        assert!(written.ends_with("bindl = , XF86AudioPlay, exec, playerctl play-pause\n"));
    }

    #[test]
    fn test_write_file_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.conf");

        write_file(&path, &parse_str("## A\nbind = 1\n")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "## A\nbind = 1\n");
    }

    #[test]
    fn test_write_file_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("keybinds.conf");

        let err = write_file(&path, &KeybindDocument::default()).unwrap_err();
        assert!(matches!(err, KeybindsError::NotFound { .. } | KeybindsError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybinds.conf");
        std::fs::write(&path, SCENARIO).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_file(&path, &parse_str(SCENARIO)).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
