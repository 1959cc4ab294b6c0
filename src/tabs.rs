//! The two top-level pages of the application.

mod keybinds;
mod presets;

use clap::ValueEnum;

pub use keybinds::KeybindsTab;
pub use presets::PresetsTab;

use crate::ui::{Component, Keybinding, Toast};

/// Identifies a tab, also used for the `--tab` command line flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TabId {
    #[default]
    Keybinds,
    Presets,
}

impl TabId {
    pub const ALL: [Self; 2] = [Self::Keybinds, Self::Presets];

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Keybinds => Self::Presets,
            Self::Presets => Self::Keybinds,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        // two tabs, so previous is next
        self.next()
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Keybinds => 0,
            Self::Presets => 1,
        }
    }
}

/// Outcome of a tab operation the app should surface to the user.
pub enum TabEvent {
    Notify(Toast),
    Failed(String),
}

/// A page with its own keybindings and status lines.
pub trait Tab: Component<Output = TabEvent> {
    fn title(&self) -> &'static str;

    /// Keybindings for the status bar hints and the help overlay.
    fn keybindings(&self) -> Vec<Keybinding>;

    /// Label and value pairs shown in the status bar.
    fn status(&self) -> Vec<(&'static str, String)>;

    /// Text pasted into the terminal while this tab is active.
    fn handle_paste(&mut self, text: &str) {
        _ = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(TabId::Keybinds.next(), TabId::Presets);
        assert_eq!(TabId::Presets.next(), TabId::Keybinds);
        assert_eq!(TabId::Keybinds.previous(), TabId::Presets);
        assert_eq!(TabId::ALL.map(TabId::index), [0, 1]);
    }
}
