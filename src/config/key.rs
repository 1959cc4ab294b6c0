//! Key chords for the application's own keybindings (not the Hyprland ones).

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key")]
    Empty,
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn with_ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match (self.code, event.code) {
            // Terminals disagree on whether shifted characters also carry SHIFT,
            // so compare the character itself and ignore SHIFT.
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                a == b
                    && (self.modifiers - KeyModifiers::SHIFT)
                        == (event.modifiers - KeyModifiers::SHIFT)
            }
            // BackTab is reported with SHIFT on most terminals
            (KeyCode::BackTab, KeyCode::BackTab) => true,
            _ => self.code == event.code && self.modifiers == event.modifiers,
        }
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("shift".to_string());
        }

        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };

        parts.push(key);
        parts.join("+")
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        // "+" on its own, or as the last part of "ctrl++", is the plus key
        let (modifier_part, key_part) = match s.strip_suffix("++") {
            Some(rest) => (Some(rest), "+"),
            None if s == "+" => (None, "+"),
            None => match s.rsplit_once('+') {
                Some((mods, key)) => (Some(mods), key),
                None => (None, s),
            },
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in modifier_part.into_iter().flat_map(|m| m.split('+')) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(KeyParseError::UnknownModifier(part.to_string())),
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "insert" | "ins" => KeyCode::Insert,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            lower if lower.len() > 1 && lower.starts_with('f') => lower[1..]
                .parse()
                .map(KeyCode::F)
                .map_err(|_| KeyParseError::UnknownKey(key_part.to_string()))?,
            _ => {
                // single characters keep their case, 'G' and 'g' are different keys
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(KeyParseError::UnknownKey(key_part.to_string())),
                }
            }
        };

        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.display())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One or more keys bound to the same action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyBinding {
    Single(Key),
    Multiple(Vec<Key>),
}

impl KeyBinding {
    pub const fn multiple(keys: Vec<Key>) -> Self {
        Self::Multiple(keys)
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match self {
            Self::Single(key) => key.matches(event),
            Self::Multiple(keys) => keys.iter().any(|k| k.matches(event)),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Single(key) => key.display(),
            Self::Multiple(keys) => keys.iter().map(Key::display).collect::<Vec<_>>().join("/"),
        }
    }
}

impl From<Key> for KeyBinding {
    fn from(key: Key) -> Self {
        Self::Single(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::from_str("a").unwrap(), Key::new(KeyCode::Char('a')));
        assert_eq!(Key::from_str("Enter").unwrap(), Key::new(KeyCode::Enter));
        assert_eq!(Key::from_str("backtab").unwrap(), Key::new(KeyCode::BackTab));
        assert_eq!(
            Key::from_str("ctrl+r").unwrap(),
            Key::with_ctrl(KeyCode::Char('r'))
        );
        assert_eq!(Key::from_str("F5").unwrap(), Key::new(KeyCode::F(5)));
        assert_eq!(Key::from_str("?").unwrap(), Key::new(KeyCode::Char('?')));
        assert_eq!(Key::from_str("+").unwrap(), Key::new(KeyCode::Char('+')));
        assert_eq!(
            Key::from_str("ctrl++").unwrap(),
            Key::with_ctrl(KeyCode::Char('+'))
        );
    }

    #[test]
    fn test_key_parsing_keeps_case() {
        assert_eq!(Key::from_str("D").unwrap(), Key::new(KeyCode::Char('D')));
        assert_ne!(Key::from_str("D").unwrap(), Key::from_str("d").unwrap());
    }

    #[test]
    fn test_key_parsing_errors() {
        assert_eq!(Key::from_str(""), Err(KeyParseError::Empty));
        assert!(matches!(
            Key::from_str("hyper+a"),
            Err(KeyParseError::UnknownModifier(_))
        ));
        assert!(matches!(Key::from_str("nope"), Err(KeyParseError::UnknownKey(_))));
        assert!(matches!(Key::from_str("fx"), Err(KeyParseError::UnknownKey(_))));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::new(KeyCode::Char('a')).display(), "a");
        assert_eq!(Key::new(KeyCode::Enter).display(), "Enter");
        assert_eq!(Key::with_ctrl(KeyCode::Char('r')).display(), "ctrl+r");
    }

    #[test]
    fn test_key_matches() {
        let key = Key::new(KeyCode::Char('d'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_shifted_char_matches_with_or_without_shift() {
        let key = Key::new(KeyCode::Char('?'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_backtab_matches_with_shift() {
        let key = Key::new(KeyCode::BackTab);
        assert!(key.matches(&KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_binding_round_trips_through_toml() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            delete: KeyBinding,
        }

        let parsed: Wrapper = toml::from_str(r#"delete = ["d", "Delete"]"#).unwrap();
        assert_eq!(parsed.delete.display(), "d/Delete");

        let single: Wrapper = toml::from_str(r#"delete = "x""#).unwrap();
        assert_eq!(single.delete, Key::new(KeyCode::Char('x')).into());
    }
}
