use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, ListItem};
use tracing::warn;

use crate::Theme;
use crate::config::{KeyResolver, PresetsAction};
use crate::presets::{PresetError, PresetStore};
use crate::tabs::{Tab, TabEvent};
use crate::ui::{
    Component, ConfirmDialog, ConfirmEvent, EventResult, Keybinding, List, ListRow, Result,
    TextInput, TextInputEvent, Toast,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PresetRow(String);

impl ListRow for PresetRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        ListItem::new(self.0.clone()).style(Style::default().fg(theme.text()))
    }
}

enum Mode {
    Browse,
    Saving(TextInput),
    ConfirmingDelete { name: String, dialog: ConfirmDialog },
}

/// Save, apply and delete Waybar presets.
pub struct PresetsTab {
    store: PresetStore,
    list: List<PresetRow>,
    mode: Mode,
    resolver: Arc<KeyResolver>,
}

impl PresetsTab {
    pub fn new(store: PresetStore, resolver: Arc<KeyResolver>) -> Self {
        let list = List::new(Vec::new(), resolver.clone())
            .with_empty_message("No presets saved yet");
        let mut tab = Self {
            store,
            list,
            mode: Mode::Browse,
            resolver,
        };
        if let Err(e) = tab.refresh() {
            warn!("Failed to list presets: {}", e);
        }
        tab
    }

    fn refresh(&mut self) -> std::result::Result<(), PresetError> {
        let names = self.store.list()?;
        self.list
            .set_items(names.into_iter().map(PresetRow).collect());
        Ok(())
    }

    fn select_name(&mut self, name: &str) {
        if let Some(position) = self.list.items().iter().position(|row| row.0 == name) {
            self.list.select(position);
        }
    }

    fn selected_name(&self) -> Option<String> {
        self.list.selected().map(|row| row.0.clone())
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<EventResult<TabEvent>> {
        if self.resolver.matches_presets(&key, PresetsAction::Refresh) {
            return Ok(match self.refresh() {
                Ok(()) => TabEvent::Notify(Toast::info("Presets refreshed")).into(),
                Err(e) => TabEvent::Failed(format!("Failed to list presets: {e}")).into(),
            });
        }
        if self.resolver.matches_presets(&key, PresetsAction::Save) {
            self.mode = Mode::Saving(TextInput::new("Save current Waybar config as"));
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_presets(&key, PresetsAction::Apply) {
            return Ok(match self.selected_name() {
                Some(name) => self.apply(&name),
                None => EventResult::Consumed,
            });
        }
        if self.resolver.matches_presets(&key, PresetsAction::Delete) {
            if let Some(name) = self.selected_name() {
                let dialog =
                    ConfirmDialog::new(format!("Delete preset \"{name}\"?"), self.resolver.clone())
                        .with_title("Delete preset")
                        .danger();
                self.mode = Mode::ConfirmingDelete { name, dialog };
            }
            return Ok(EventResult::Consumed);
        }

        Ok(match self.list.handle_key(key)? {
            EventResult::Ignored => EventResult::Ignored,
            _ => EventResult::Consumed,
        })
    }

    fn save(&mut self, name: &str) -> EventResult<TabEvent> {
        match self.store.save(name) {
            Ok(saved) => {
                if let Err(e) = self.refresh() {
                    warn!("Failed to list presets: {}", e);
                }
                self.select_name(&saved);
                TabEvent::Notify(Toast::success(format!("Saved preset \"{saved}\""))).into()
            }
            Err(e) => TabEvent::Failed(format!("Failed to save preset: {e}")).into(),
        }
    }

    fn apply(&mut self, name: &str) -> EventResult<TabEvent> {
        match self.store.apply(name) {
            Ok(applied) => match applied.reload_error {
                None => TabEvent::Notify(Toast::success(format!(
                    "Applied preset \"{}\"",
                    applied.name
                )))
                .into(),
                Some(e) => TabEvent::Notify(Toast::warning(format!(
                    "Applied \"{}\" but Waybar reload failed: {e}",
                    applied.name
                )))
                .into(),
            },
            Err(e) => TabEvent::Failed(format!("Failed to apply preset: {e}")).into(),
        }
    }

    fn delete(&mut self, name: &str) -> EventResult<TabEvent> {
        let result = self.store.delete(name);
        if let Err(e) = self.refresh() {
            warn!("Failed to list presets: {}", e);
        }
        match result {
            Ok(()) => TabEvent::Notify(Toast::success(format!("Deleted preset \"{name}\""))).into(),
            Err(e) => TabEvent::Failed(format!("Failed to delete preset: {e}")).into(),
        }
    }
}

impl Component for PresetsTab {
    type Output = TabEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Saving(mut input) => Ok(match input.handle_key(key)? {
                EventResult::Event(TextInputEvent::Submitted(name)) => self.save(&name),
                EventResult::Event(TextInputEvent::Cancelled) => EventResult::Consumed,
                _ => {
                    self.mode = Mode::Saving(input);
                    EventResult::Consumed
                }
            }),
            Mode::ConfirmingDelete { name, mut dialog } => Ok(match dialog.handle_key(key)? {
                EventResult::Event(ConfirmEvent::Confirmed) => self.delete(&name),
                EventResult::Event(ConfirmEvent::Cancelled) => EventResult::Consumed,
                _ => {
                    self.mode = Mode::ConfirmingDelete { name, dialog };
                    EventResult::Consumed
                }
            }),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if matches!(self.mode, Mode::Browse) {
            theme.border_focused()
        } else {
            theme.border()
        };
        let block = Block::default()
            .title(" Waybar Presets ")
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.list.render(frame, inner, theme);

        match &mut self.mode {
            Mode::Saving(input) => input.render(frame, area, theme),
            Mode::ConfirmingDelete { dialog, .. } => dialog.render(frame, area, theme),
            Mode::Browse => {}
        }
    }
}

impl Tab for PresetsTab {
    fn title(&self) -> &'static str {
        "Waybar Presets"
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let r = &self.resolver;
        vec![
            Keybinding::hint(r.display_presets(PresetsAction::Apply), "Apply preset"),
            Keybinding::hint(r.display_presets(PresetsAction::Save), "Save current"),
            Keybinding::hint(r.display_presets(PresetsAction::Delete), "Delete preset"),
            Keybinding::hint(r.display_presets(PresetsAction::Refresh), "Refresh"),
        ]
    }

    fn status(&self) -> Vec<(&'static str, String)> {
        vec![
            ("presets", self.store.presets_dir().display().to_string()),
            ("waybar", self.store.live_dir().display().to_string()),
            ("saved", self.list.items().len().to_string()),
        ]
    }

    fn handle_paste(&mut self, text: &str) {
        if let Mode::Saving(input) = &mut self.mode {
            input.handle_paste(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;

    use crate::presets::Reloader;

    struct CountingReloader(Rc<Cell<usize>>);

    impl Reloader for CountingReloader {
        fn reload(&self) -> std::io::Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct FailingReloader;

    impl Reloader for FailingReloader {
        fn reload(&self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no script"))
        }
    }

    fn setup(reloader: Box<dyn Reloader>) -> (tempfile::TempDir, PresetsTab) {
        let dir = tempfile::tempdir().unwrap();
        let waybar = dir.path().join("waybar");
        fs::create_dir_all(&waybar).unwrap();
        fs::write(waybar.join("config.jsonc"), "{\"layer\": \"top\"}").unwrap();
        fs::write(waybar.join("style.css"), "* { color: red; }").unwrap();

        let store = PresetStore::new(dir.path().join("presets"), waybar, reloader);
        let tab = PresetsTab::new(store, Arc::new(KeyResolver::default()));
        (dir, tab)
    }

    fn press(tab: &mut PresetsTab, code: KeyCode) -> EventResult<TabEvent> {
        tab.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn save_as(tab: &mut PresetsTab, name: &str) -> EventResult<TabEvent> {
        press(tab, KeyCode::Char('s'));
        for c in name.chars() {
            press(tab, KeyCode::Char(c));
        }
        press(tab, KeyCode::Enter)
    }

    #[test]
    fn test_save_lists_and_selects_preset() {
        let (dir, mut tab) = setup(Box::new(FailingReloader));

        save_as(&mut tab, "minimal");
        let result = save_as(&mut tab, "colorful");

        assert!(matches!(result, EventResult::Event(TabEvent::Notify(_))));
        assert_eq!(
            tab.list.items(),
            &[
                PresetRow("colorful".to_string()),
                PresetRow("minimal".to_string())
            ]
        );
        assert_eq!(tab.selected_name().as_deref(), Some("colorful"));
        assert!(dir.path().join("presets/minimal/style.css").is_file());
    }

    #[test]
    fn test_save_invalid_name_fails() {
        let (_dir, mut tab) = setup(Box::new(FailingReloader));

        let result = save_as(&mut tab, "../escape");
        assert!(matches!(result, EventResult::Event(TabEvent::Failed(_))));
        assert!(tab.list.items().is_empty());
    }

    #[test]
    fn test_apply_selected_preset() {
        let calls = Rc::new(Cell::new(0));
        let (dir, mut tab) = setup(Box::new(CountingReloader(Rc::clone(&calls))));
        save_as(&mut tab, "minimal");

        let waybar = dir.path().join("waybar");
        fs::write(waybar.join("config.jsonc"), "changed").unwrap();
        fs::write(waybar.join("extra.css"), "stale").unwrap();

        let result = press(&mut tab, KeyCode::Enter);
        assert!(matches!(result, EventResult::Event(TabEvent::Notify(_))));
        assert_eq!(calls.get(), 1);
        assert_eq!(
            fs::read_to_string(waybar.join("config.jsonc")).unwrap(),
            "{\"layer\": \"top\"}"
        );
        assert!(!waybar.join("extra.css").exists());
    }

    #[test]
    fn test_apply_with_failed_reload_warns() {
        let (_dir, mut tab) = setup(Box::new(FailingReloader));
        save_as(&mut tab, "minimal");

        match press(&mut tab, KeyCode::Enter) {
            EventResult::Event(TabEvent::Notify(toast)) => {
                assert_eq!(toast.toast_type(), crate::ui::ToastType::Warning);
            }
            _ => panic!("expected a warning toast"),
        }
    }

    #[test]
    fn test_delete_after_confirmation() {
        let (dir, mut tab) = setup(Box::new(FailingReloader));
        save_as(&mut tab, "minimal");

        press(&mut tab, KeyCode::Char('d'));
        press(&mut tab, KeyCode::Esc);
        assert!(dir.path().join("presets/minimal").is_dir());

        press(&mut tab, KeyCode::Char('d'));
        press(&mut tab, KeyCode::Char('y'));
        assert!(!dir.path().join("presets/minimal").exists());
        assert!(tab.list.items().is_empty());
    }

    #[test]
    fn test_refresh_picks_up_external_presets() {
        let (dir, mut tab) = setup(Box::new(FailingReloader));
        fs::create_dir_all(dir.path().join("presets/external")).unwrap();

        press(&mut tab, KeyCode::Char('r'));
        assert_eq!(tab.selected_name().as_deref(), Some("external"));
    }
}
