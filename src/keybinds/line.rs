//! Line classification for the keybind file format.

/// Prefix that opens a new section when it starts a trimmed line.
pub const SECTION_MARKER: &str = "##";

/// Category of a single line of the keybind file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `## <header>`; carries the trimmed header text.
    Header(&'a str),
    /// Any other non-blank line; carries the line trimmed at both ends.
    Entry(&'a str),
    /// Empty or whitespace-only.
    Blank,
}

/// Classify a line. Line terminators count as whitespace.
///
/// Bind lines are opaque: `bind`, `bindm`, `bindl`, `bindel` and arbitrary
/// text all classify as [`LineKind::Entry`].
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    match trimmed.strip_prefix(SECTION_MARKER) {
        Some(header) => LineKind::Header(header.trim()),
        None => LineKind::Entry(trimmed),
    }
}

/// Returns true if the text is empty or whitespace-only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_header() {
        assert_eq!(classify("## General\n"), LineKind::Header("General"));
        assert_eq!(classify("  ##   Media  \r\n"), LineKind::Header("Media"));
        assert_eq!(classify("##"), LineKind::Header(""));
        assert_eq!(classify("### Nested"), LineKind::Header("# Nested"));
    }

    #[test]
    fn test_classify_entry() {
        assert_eq!(
            classify("  bind = SUPER, Q, killactive \n"),
            LineKind::Entry("bind = SUPER, Q, killactive")
        );
        assert_eq!(
            classify("bindl = , XF86AudioMute, exec, pamixer -t"),
            LineKind::Entry("bindl = , XF86AudioMute, exec, pamixer -t")
        );
        // a single '#' is a comment line in Hyprland, but still an opaque entry here
        assert_eq!(classify("# comment"), LineKind::Entry("# comment"));
    }

    #[test]
    fn test_classify_blank() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("\n"), LineKind::Blank);
        assert_eq!(classify(" \t \r\n"), LineKind::Blank);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" x "));
    }
}
