//! Hyprland keybind file model.
//!
//! The file is line oriented: an opaque preamble, then `## <header>` lines
//! each followed by that section's entries. Parsing and writing round-trip
//! the preamble byte-for-byte; blank lines inside sections are dropped.

mod document;
mod editor;
mod error;
mod line;
mod parser;
mod writer;

pub use document::{EditOutcome, KeybindDocument, Section};
pub use editor::KeybindEditor;
pub use error::KeybindsError;
pub use line::{LineKind, SECTION_MARKER, classify};
pub use parser::{parse_file, parse_reader, parse_str};
pub use writer::{render, write_file};
