//! Parser for the `##`-sectioned keybind file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::keybinds::document::{KeybindDocument, Section};
use crate::keybinds::error::KeybindsError;
use crate::keybinds::line::{LineKind, classify};

/// Parse a keybind file from disk.
///
/// # Errors
/// Returns [`KeybindsError::NotFound`] if the file does not exist and
/// [`KeybindsError::Io`] for any other open or read failure, including
/// content that is not valid UTF-8.
pub fn parse_file(path: &Path) -> Result<KeybindDocument, KeybindsError> {
    let file = File::open(path).map_err(|e| KeybindsError::io(path, e))?;
    let document = parse_reader(BufReader::new(file)).map_err(|e| KeybindsError::io(path, e))?;
    debug!(
        "Parsed {:?}: {} preamble lines, {} sections, {} entries",
        path,
        document.preamble.len(),
        document.sections.len(),
        document.entry_count()
    );
    Ok(document)
}

/// Parse keybind file content held in memory.
pub fn parse_str(content: &str) -> KeybindDocument {
    let mut parser = Parser::default();
    for line in content.split_inclusive('\n') {
        parser.push_line(line);
    }
    parser.finish()
}

/// Parse line by line from a buffered reader.
///
/// # Errors
/// Propagates read errors from the underlying reader.
pub fn parse_reader<R: BufRead>(mut reader: R) -> std::io::Result<KeybindDocument> {
    let mut parser = Parser::default();
    let mut line = String::new();
    while reader.read_line(&mut line)? > 0 {
        parser.push_line(&line);
        line.clear();
    }
    Ok(parser.finish())
}

#[derive(Default)]
struct Parser {
    preamble: Vec<String>,
    sections: Vec<Section>,
}

impl Parser {
    /// Feed one raw line, terminator included.
    fn push_line(&mut self, raw: &str) {
        let kind = classify(raw);

        if let LineKind::Header(header) = kind {
            self.sections.push(Section::new(header));
            return;
        }

        // Everything before the first header is kept byte-for-byte
        let Some(current) = self.sections.last_mut() else {
            self.preamble.push(raw.to_string());
            return;
        };

        if let LineKind::Entry(entry) = kind {
            current.entries.push(entry.to_string());
        }
    }

    fn finish(self) -> KeybindDocument {
        KeybindDocument {
            preamble: self.preamble,
            sections: self.sections,
        }
    }
}
