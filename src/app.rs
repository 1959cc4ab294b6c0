use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Tabs;
use tracing::{debug, error, info, warn};

use crate::config::{self, DialogAction, GlobalAction, KeyResolver, NavAction, Paths};
use crate::presets::{PresetStore, ScriptReloader};
use crate::tabs::{KeybindsTab, PresetsTab, Tab, TabEvent, TabId};
use crate::theme::{ThemeEvent, ThemeSelectorView, theme_from_name};
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, ErrorDialog, ErrorDialogEvent, EventResult, HelpEvent, HelpOverlay, Keybinding,
    KeybindingSection, STATUS_BAR_HEIGHT, StatusBar, Toast, ToastManager,
};
use crate::Theme;

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 4.0;

/// Popups that take all input until closed.
enum Overlay {
    Help(HelpOverlay),
    Theme(ThemeSelectorView),
    Error(ErrorDialog),
}

pub struct App {
    keybinds: KeybindsTab,
    presets: PresetsTab,
    active: TabId,
    overlay: Option<Overlay>,
    toasts: ToastManager,
    status_bar: StatusBar,
    theme: Theme,
    theme_name: String,
    config_path: Option<PathBuf>,
    resolver: Arc<KeyResolver>,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    /// Build the application. `config_path` is where theme changes are
    /// persisted; `None` keeps them in memory only.
    pub fn new(
        paths: Paths,
        theme_name: &str,
        initial_tab: TabId,
        config_path: Option<PathBuf>,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let store = PresetStore::new(
            paths.presets_dir,
            paths.waybar_dir,
            Box::new(ScriptReloader::new(paths.reload_script)),
        );
        Self {
            keybinds: KeybindsTab::new(paths.keybinds_file, resolver.clone()),
            presets: PresetsTab::new(store, resolver.clone()),
            active: initial_tab,
            overlay: None,
            toasts: ToastManager::default(),
            status_bar: StatusBar::new(resolver.clone()),
            theme: theme_from_name(theme_name),
            theme_name: theme_name.to_string(),
            config_path,
            resolver,
            should_quit: false,
            should_suspend: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        while let Some(event) = tui.next_event().await {
            self.handle_event(&mut tui, event)?;

            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui.enter()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        info!("Exiting lazysettings");
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> color_eyre::Result<()> {
        match event {
            Event::Init => debug!("Terminal event loop started"),
            Event::Quit => self.should_quit = true,
            Event::Suspend => self.should_suspend = true,
            Event::Tick => self.toasts.handle_tick(),
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Key(key) => self.handle_key(key)?,
            Event::Paste(text) => {
                if self.overlay.is_none() {
                    self.active_tab_mut().handle_paste(&text);
                }
            }
            Event::Error(e) => warn!("Terminal event error: {}", e),
        }
        Ok(())
    }

    fn active_tab(&self) -> &dyn Tab {
        match self.active {
            TabId::Keybinds => &self.keybinds,
            TabId::Presets => &self.presets,
        }
    }

    fn active_tab_mut(&mut self) -> &mut dyn Tab {
        match self.active {
            TabId::Keybinds => &mut self.keybinds,
            TabId::Presets => &mut self.presets,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        if let Some(overlay) = self.overlay.take() {
            self.overlay = self.handle_overlay_key(overlay, key)?;
            return Ok(());
        }

        match self.active_tab_mut().handle_key(key)? {
            EventResult::Event(event) => {
                self.handle_tab_event(event);
                return Ok(());
            }
            EventResult::Consumed => return Ok(()),
            EventResult::Ignored => {}
        }

        self.handle_global_key(key);
        Ok(())
    }

    /// Route a key to the open overlay, returning it if it stays open.
    fn handle_overlay_key(
        &mut self,
        mut overlay: Overlay,
        key: KeyEvent,
    ) -> color_eyre::Result<Option<Overlay>> {
        let closed = match &mut overlay {
            Overlay::Help(help) => {
                matches!(help.handle_key(key)?, EventResult::Event(HelpEvent::Close))
            }
            Overlay::Error(dialog) => matches!(
                dialog.handle_key(key)?,
                EventResult::Event(ErrorDialogEvent::Dismissed)
            ),
            Overlay::Theme(selector) => match selector.handle_key(key)? {
                EventResult::Event(ThemeEvent::Selected(info)) => {
                    self.set_theme(info.name);
                    true
                }
                EventResult::Event(ThemeEvent::Cancelled) => true,
                _ => false,
            },
        };
        Ok(if closed { None } else { Some(overlay) })
    }

    fn handle_tab_event(&mut self, event: TabEvent) {
        match event {
            TabEvent::Notify(toast) => self.toasts.show(toast),
            TabEvent::Failed(message) => {
                error!("{}", message);
                self.overlay = Some(Overlay::Error(ErrorDialog::new(
                    message,
                    self.resolver.clone(),
                )));
            }
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) {
        let r = &self.resolver;
        if r.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
        } else if r.matches_global(&key, GlobalAction::Help) {
            self.overlay = Some(Overlay::Help(HelpOverlay::new(
                self.help_sections(),
                self.resolver.clone(),
            )));
        } else if r.matches_global(&key, GlobalAction::Theme) {
            self.overlay = Some(Overlay::Theme(ThemeSelectorView::new(
                &self.theme_name,
                self.resolver.clone(),
            )));
        } else if r.matches_global(&key, GlobalAction::NextTab) {
            self.active = self.active.next();
        } else if r.matches_global(&key, GlobalAction::PrevTab) {
            self.active = self.active.previous();
        } else if key.modifiers == KeyModifiers::NONE {
            match key.code {
                KeyCode::Char('1') => self.active = TabId::Keybinds,
                KeyCode::Char('2') => self.active = TabId::Presets,
                _ => {}
            }
        }
    }

    fn set_theme(&mut self, name: &str) {
        self.theme = theme_from_name(name);
        self.theme_name = name.to_string();
        info!("Switched theme to {}", name);

        let Some(path) = &self.config_path else {
            return;
        };
        match config::save_theme(path, name) {
            Ok(()) => self.toasts.show(Toast::success(format!("Theme set to {name}"))),
            Err(e) => {
                warn!("Failed to save theme: {}", e);
                self.toasts
                    .show(Toast::warning(format!("Theme applied but not saved: {e}")));
            }
        }
    }

    fn help_sections(&self) -> Vec<KeybindingSection> {
        let r = &self.resolver;
        vec![
            KeybindingSection::new(self.keybinds.title(), self.keybinds.keybindings()),
            KeybindingSection::new(self.presets.title(), self.presets.keybindings()),
            KeybindingSection::new(
                "Navigation",
                vec![
                    Keybinding::new(r.display_nav(NavAction::Up), "Up"),
                    Keybinding::new(r.display_nav(NavAction::Down), "Down"),
                    Keybinding::new(r.display_nav(NavAction::PageUp), "Page up"),
                    Keybinding::new(r.display_nav(NavAction::PageDown), "Page down"),
                    Keybinding::new(r.display_nav(NavAction::Home), "First"),
                    Keybinding::new(r.display_nav(NavAction::End), "Last"),
                    Keybinding::new(r.display_nav(NavAction::Select), "Select"),
                ],
            ),
            KeybindingSection::new(
                "Dialogs",
                vec![
                    Keybinding::new(r.display_dialog(DialogAction::Confirm), "Confirm"),
                    Keybinding::new(r.display_dialog(DialogAction::Cancel), "Cancel"),
                    Keybinding::new(r.display_dialog(DialogAction::Dismiss), "Dismiss error"),
                ],
            ),
            KeybindingSection::new("Global", self.status_bar.global_keybindings()),
        ]
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        tui.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let theme = self.theme;
        let [tabs_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(frame.area());

        let titles: Vec<Line> = TabId::ALL
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let title = match id {
                    TabId::Keybinds => self.keybinds.title(),
                    TabId::Presets => self.presets.title(),
                };
                Line::from(format!(" {} {} ", i + 1, title))
            })
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active.index())
            .style(Style::default().fg(theme.overlay1()))
            .highlight_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .divider("│");
        frame.render_widget(tabs, tabs_area);

        self.active_tab_mut().render(frame, content_area, &theme);

        let status = self.active_tab().status();
        let keybindings = self.active_tab().keybindings();
        self.status_bar
            .render_with_keybindings(frame, status_area, &theme, &status, &keybindings);

        self.toasts.render(frame, content_area, &theme);

        let area = frame.area();
        match &mut self.overlay {
            Some(Overlay::Help(help)) => help.render(frame, area, &theme),
            Some(Overlay::Theme(selector)) => selector.render(frame, area, &theme),
            Some(Overlay::Error(dialog)) => dialog.render(frame, area, &theme),
            None => {}
        }
    }
}
