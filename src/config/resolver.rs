use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{
    DialogAction, GlobalAction, KeybindsAction, NavAction, PresetsAction, SearchAction,
};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to actions using the configured keybindings.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::Help => &kb.help,
            GlobalAction::Theme => &kb.theme,
            GlobalAction::Back => &kb.back,
            GlobalAction::NextTab => &kb.next_tab,
            GlobalAction::PrevTab => &kb.prev_tab,
        }
    }

    fn nav(&self, action: NavAction) -> &KeyBinding {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => &kb.up,
            NavAction::Down => &kb.down,
            NavAction::PageUp => &kb.page_up,
            NavAction::PageDown => &kb.page_down,
            NavAction::Home => &kb.home,
            NavAction::End => &kb.end,
            NavAction::Select => &kb.select,
        }
    }

    fn search(&self, action: SearchAction) -> &KeyBinding {
        let kb = &self.keybindings.search;
        match action {
            SearchAction::Toggle => &kb.toggle,
            SearchAction::Exit => &kb.exit,
        }
    }

    fn keybinds(&self, action: KeybindsAction) -> &KeyBinding {
        let kb = &self.keybindings.keybinds;
        match action {
            KeybindsAction::Add => &kb.add,
            KeybindsAction::Edit => &kb.edit,
            KeybindsAction::Delete => &kb.delete,
            KeybindsAction::Reload => &kb.reload,
        }
    }

    fn presets(&self, action: PresetsAction) -> &KeyBinding {
        let kb = &self.keybindings.presets;
        match action {
            PresetsAction::Apply => &kb.apply,
            PresetsAction::Save => &kb.save,
            PresetsAction::Delete => &kb.delete,
            PresetsAction::Refresh => &kb.refresh,
        }
    }

    fn dialog(&self, action: DialogAction) -> &KeyBinding {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Confirm => &kb.confirm,
            DialogAction::Cancel => &kb.cancel,
            DialogAction::Dismiss => &kb.dismiss,
        }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global(action).display()
    }

    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        self.nav(action).matches(event)
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        self.nav(action).display()
    }

    pub fn matches_search(&self, event: &KeyEvent, action: SearchAction) -> bool {
        self.search(action).matches(event)
    }

    pub fn display_search(&self, action: SearchAction) -> String {
        self.search(action).display()
    }

    pub fn matches_keybinds(&self, event: &KeyEvent, action: KeybindsAction) -> bool {
        self.keybinds(action).matches(event)
    }

    pub fn display_keybinds(&self, action: KeybindsAction) -> String {
        self.keybinds(action).display()
    }

    pub fn matches_presets(&self, event: &KeyEvent, action: PresetsAction) -> bool {
        self.presets(action).matches(event)
    }

    pub fn display_presets(&self, action: PresetsAction) -> String {
        self.presets(action).display()
    }

    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        self.dialog(action).matches(event)
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        self.dialog(action).display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::key::Key;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let resolver = KeyResolver::default();

        assert!(resolver.matches_keybinds(&press(KeyCode::Char('a')), KeybindsAction::Add));
        assert!(resolver.matches_keybinds(&press(KeyCode::Delete), KeybindsAction::Delete));
        assert!(resolver.matches_presets(&press(KeyCode::Enter), PresetsAction::Apply));
        assert!(resolver.matches_global(&press(KeyCode::Tab), GlobalAction::NextTab));
        assert!(!resolver.matches_global(&press(KeyCode::Char('x')), GlobalAction::Quit));
        assert_eq!(resolver.display_keybinds(KeybindsAction::Edit), "e/Enter");
    }

    #[test]
    fn test_custom_bindings() {
        let mut config = KeybindingsConfig::default();
        config.presets.save = Key::with_ctrl(KeyCode::Char('s')).into();
        let resolver = KeyResolver::new(Arc::new(config));

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(resolver.matches_presets(&ctrl_s, PresetsAction::Save));
        assert!(!resolver.matches_presets(&press(KeyCode::Char('s')), PresetsAction::Save));
        assert_eq!(resolver.display_presets(PresetsAction::Save), "ctrl+s");
    }
}
