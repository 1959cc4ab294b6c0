use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, ListItem, Paragraph, Wrap};
use tracing::{debug, warn};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, KeybindsAction, NavAction, SearchAction};
use crate::keybinds::{EditOutcome, KeybindEditor, KeybindsError, LineKind, SECTION_MARKER, classify};
use crate::search::Matcher;
use crate::tabs::{Tab, TabEvent};
use crate::ui::{
    Component, ConfirmDialog, ConfirmEvent, EventResult, Keybinding, List, ListEvent, ListRow,
    Result, TextInput, TextInputEvent, Toast,
};

/// One line of the keybinds list: a section header or one of its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Header {
        section: usize,
        title: String,
    },
    Entry {
        section: usize,
        entry: usize,
        text: String,
    },
}

impl Row {
    const fn section(&self) -> usize {
        match self {
            Self::Header { section, .. } | Self::Entry { section, .. } => *section,
        }
    }
}

impl ListRow for Row {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        let line = match self {
            Self::Header { title, .. } => Line::from(Span::styled(
                format!("## {title}"),
                Style::default()
                    .fg(theme.header())
                    .add_modifier(Modifier::BOLD),
            )),
            Self::Entry { text, .. } => Line::from(Span::styled(
                format!("   {text}"),
                Style::default().fg(theme.text()),
            )),
        };
        ListItem::new(line)
    }
}

#[derive(Debug, Clone)]
struct SectionChoice {
    index: usize,
    title: String,
}

impl ListRow for SectionChoice {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        ListItem::new(self.title.clone()).style(Style::default().fg(theme.text()))
    }
}

enum Mode {
    Browse,
    Filtering,
    Adding(TextInput),
    PickingSection {
        text: String,
        list: List<SectionChoice>,
    },
    Editing {
        section: usize,
        entry: usize,
        input: TextInput,
    },
    ConfirmingDelete {
        section: usize,
        entry: usize,
        dialog: ConfirmDialog,
    },
}

/// Browse and edit the entries of a keybind file.
pub struct KeybindsTab {
    path: PathBuf,
    editor: Option<KeybindEditor>,
    load_error: Option<String>,
    list: List<Row>,
    mode: Mode,
    filter: String,
    matcher: Matcher,
    resolver: Arc<KeyResolver>,
}

impl KeybindsTab {
    pub fn new(path: impl Into<PathBuf>, resolver: Arc<KeyResolver>) -> Self {
        let mut tab = Self {
            path: path.into(),
            editor: None,
            load_error: None,
            list: List::new(Vec::new(), resolver.clone())
                .with_empty_message("No entries match the filter"),
            mode: Mode::Browse,
            filter: String::new(),
            matcher: Matcher::new(),
            resolver,
        };
        tab.open();
        tab
    }

    fn open(&mut self) {
        match KeybindEditor::open(&self.path) {
            Ok(editor) => {
                self.editor = Some(editor);
                self.load_error = None;
            }
            Err(e) => {
                warn!("Keybind file unavailable: {}", e);
                self.editor = None;
                self.load_error = Some(e.to_string());
            }
        }
        self.refresh_rows();
    }

    fn rows(&self) -> Vec<Row> {
        let Some(editor) = &self.editor else {
            return Vec::new();
        };

        let mut rows = Vec::new();
        for (section_index, section) in editor.document().sections.iter().enumerate() {
            let entries: Vec<Row> = section
                .entries
                .iter()
                .enumerate()
                .filter(|(_, text)| self.matcher.matches(text, &self.filter))
                .map(|(entry, text)| Row::Entry {
                    section: section_index,
                    entry,
                    text: text.clone(),
                })
                .collect();

            // sections without matches are hidden while filtering
            if !self.filter.is_empty() && entries.is_empty() {
                continue;
            }
            rows.push(Row::Header {
                section: section_index,
                title: section.header.clone(),
            });
            rows.extend(entries);
        }
        rows
    }

    fn refresh_rows(&mut self) {
        let rows = self.rows();
        self.list.set_items(rows);
    }

    fn select_entry(&mut self, section: usize, entry: usize) {
        let position = self.list.items().iter().position(|row| {
            matches!(row, Row::Entry { section: s, entry: e, .. } if *s == section && *e == entry)
        });
        if let Some(position) = position {
            self.list.select(position);
        }
    }

    fn selected_entry(&self) -> Option<(usize, usize, String)> {
        match self.list.selected()? {
            Row::Entry {
                section,
                entry,
                text,
            } => Some((*section, *entry, text.clone())),
            Row::Header { .. } => None,
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<EventResult<TabEvent>> {
        if self.resolver.matches_keybinds(&key, KeybindsAction::Reload) {
            return Ok(self.reload());
        }
        if self.editor.is_none() {
            return Ok(EventResult::Ignored);
        }

        if self.resolver.matches_search(&key, SearchAction::Toggle) {
            self.mode = Mode::Filtering;
            return Ok(EventResult::Consumed);
        }
        if !self.filter.is_empty() && self.resolver.matches_search(&key, SearchAction::Exit) {
            self.clear_filter();
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_keybinds(&key, KeybindsAction::Add) {
            self.mode = Mode::Adding(
                TextInput::new("New keybind")
                    .with_placeholder("bind = SUPER, Return, exec, kitty"),
            );
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_keybinds(&key, KeybindsAction::Edit) {
            if let Some((section, entry, text)) = self.selected_entry() {
                self.mode = Mode::Editing {
                    section,
                    entry,
                    input: TextInput::new("Edit keybind (empty to delete)").with_value(text),
                };
            }
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_keybinds(&key, KeybindsAction::Delete) {
            if let Some((section, entry, text)) = self.selected_entry() {
                let dialog = ConfirmDialog::new(format!("Delete \"{text}\"?"), self.resolver.clone())
                    .with_title("Delete keybind")
                    .danger();
                self.mode = Mode::ConfirmingDelete {
                    section,
                    entry,
                    dialog,
                };
            }
            return Ok(EventResult::Consumed);
        }

        Ok(match self.list.handle_key(key)? {
            EventResult::Ignored => EventResult::Ignored,
            _ => EventResult::Consumed,
        })
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Result<EventResult<TabEvent>> {
        if self.resolver.matches_search(&key, SearchAction::Exit) {
            self.clear_filter();
            return Ok(EventResult::Consumed);
        }

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {}
            (KeyCode::Backspace, _) => {
                self.filter.pop();
                self.refresh_rows();
                self.mode = Mode::Filtering;
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.filter.push(c);
                self.refresh_rows();
                self.mode = Mode::Filtering;
            }
            (KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown, _) => {
                self.list.handle_key(key)?;
                self.mode = Mode::Filtering;
            }
            _ => self.mode = Mode::Filtering,
        }
        Ok(EventResult::Consumed)
    }

    fn clear_filter(&mut self) {
        self.filter.clear();
        self.mode = Mode::Browse;
        self.refresh_rows();
    }

    fn reload(&mut self) -> EventResult<TabEvent> {
        let Some(editor) = self.editor.as_mut() else {
            self.open();
            return match &self.load_error {
                Some(e) => TabEvent::Failed(e.clone()).into(),
                None => TabEvent::Notify(Toast::success("Keybinds loaded")).into(),
            };
        };

        match editor.reload() {
            Ok(()) => {
                self.refresh_rows();
                TabEvent::Notify(Toast::success("Keybinds reloaded")).into()
            }
            Err(e) => {
                warn!("Reload failed: {}", e);
                TabEvent::Failed(format!("Failed to reload keybinds: {e}")).into()
            }
        }
    }

    /// Start the second step of adding: choosing the target section.
    fn pick_section(&mut self, text: String) -> EventResult<TabEvent> {
        if text.trim().is_empty() {
            return TabEvent::Notify(Toast::info("Empty keybind, nothing added")).into();
        }
        if matches!(classify(&text), LineKind::Header(_)) {
            return Self::outcome_event(Ok(EditOutcome::HeaderText));
        }
        let Some(editor) = &self.editor else {
            return EventResult::Consumed;
        };

        let choices: Vec<SectionChoice> = editor
            .document()
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| SectionChoice {
                index,
                title: section.header.clone(),
            })
            .collect();

        if choices.len() == 1 {
            return self.add(0, &text);
        }

        let current = self.list.selected().map_or(0, Row::section);
        let mut list = List::new(choices, self.resolver.clone());
        list.select(current);
        self.mode = Mode::PickingSection { text, list };
        EventResult::Consumed
    }

    fn add(&mut self, section: usize, text: &str) -> EventResult<TabEvent> {
        let Some(editor) = self.editor.as_mut() else {
            return EventResult::Consumed;
        };
        let result = editor.add_entry(section, text);
        let last = editor
            .document()
            .section(section)
            .map_or(0, |s| s.entries.len().saturating_sub(1));

        self.refresh_rows();
        if matches!(result, Ok(EditOutcome::Added)) {
            self.select_entry(section, last);
        }
        Self::outcome_event(result)
    }

    fn replace(&mut self, section: usize, entry: usize, text: &str) -> EventResult<TabEvent> {
        let Some(editor) = self.editor.as_mut() else {
            return EventResult::Consumed;
        };
        let result = editor.replace_entry(section, entry, text);
        self.refresh_rows();
        Self::outcome_event(result)
    }

    fn delete(&mut self, section: usize, entry: usize) -> EventResult<TabEvent> {
        let Some(editor) = self.editor.as_mut() else {
            return EventResult::Consumed;
        };
        let result = editor.delete_entry(section, entry);
        self.refresh_rows();
        Self::outcome_event(result)
    }

    fn outcome_event(
        result: std::result::Result<EditOutcome, KeybindsError>,
    ) -> EventResult<TabEvent> {
        match result {
            Ok(EditOutcome::Added) => TabEvent::Notify(Toast::success("Keybind added")).into(),
            Ok(EditOutcome::Replaced) => {
                TabEvent::Notify(Toast::success("Keybind updated")).into()
            }
            Ok(EditOutcome::Removed) => {
                TabEvent::Notify(Toast::success("Keybind deleted")).into()
            }
            Ok(EditOutcome::HeaderText) => TabEvent::Notify(Toast::info(format!(
                "Lines starting with {SECTION_MARKER} are section headers"
            )))
            .into(),
            Ok(EditOutcome::Unchanged) => {
                debug!("Edit left the keybind file unchanged");
                EventResult::Consumed
            }
            Err(e) => TabEvent::Failed(format!("Failed to save keybinds: {e}")).into(),
        }
    }

    fn render_unavailable(&self, frame: &mut Frame, area: Rect, theme: &Theme, error: &str) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing to edit",
                Style::default()
                    .fg(theme.red())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(error.to_string(), Style::default().fg(theme.text()))),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Press {} to try again",
                    self.resolver.display_keybinds(KeybindsAction::Reload)
                ),
                Style::default().fg(theme.overlay1()),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let typing = matches!(self.mode, Mode::Filtering);
        let mut spans = vec![
            Span::styled("/", Style::default().fg(theme.peach())),
            Span::styled(self.filter.clone(), Style::default().fg(theme.text())),
        ];
        if typing {
            spans.push(Span::styled(
                " ",
                Style::default().bg(theme.text()),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_section_picker(
        list: &mut List<SectionChoice>,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
    ) {
        let height = u16::try_from(list.items().len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(14);
        let popup_area = area.centered(Constraint::Percentage(50), Constraint::Length(height));

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Add to section (Enter to confirm, Esc to cancel) ")
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);
        list.render(frame, inner, theme);
    }
}

impl Component for KeybindsTab {
    type Output = TabEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Filtering => self.handle_filter_key(key),
            Mode::Adding(mut input) => Ok(match input.handle_key(key)? {
                EventResult::Event(TextInputEvent::Submitted(text)) => self.pick_section(text),
                EventResult::Event(TextInputEvent::Cancelled) => EventResult::Consumed,
                _ => {
                    self.mode = Mode::Adding(input);
                    EventResult::Consumed
                }
            }),
            Mode::PickingSection { text, mut list } => {
                if self.resolver.matches_global(&key, GlobalAction::Back) {
                    return Ok(EventResult::Consumed);
                }
                Ok(match list.handle_key(key)? {
                    EventResult::Event(ListEvent::Activated(choice)) => {
                        self.add(choice.index, &text)
                    }
                    _ => {
                        self.mode = Mode::PickingSection { text, list };
                        EventResult::Consumed
                    }
                })
            }
            Mode::Editing {
                section,
                entry,
                mut input,
            } => Ok(match input.handle_key(key)? {
                EventResult::Event(TextInputEvent::Submitted(text)) => {
                    self.replace(section, entry, &text)
                }
                EventResult::Event(TextInputEvent::Cancelled) => EventResult::Consumed,
                _ => {
                    self.mode = Mode::Editing {
                        section,
                        entry,
                        input,
                    };
                    EventResult::Consumed
                }
            }),
            Mode::ConfirmingDelete {
                section,
                entry,
                mut dialog,
            } => Ok(match dialog.handle_key(key)? {
                EventResult::Event(ConfirmEvent::Confirmed) => self.delete(section, entry),
                EventResult::Event(ConfirmEvent::Cancelled) => EventResult::Consumed,
                _ => {
                    self.mode = Mode::ConfirmingDelete {
                        section,
                        entry,
                        dialog,
                    };
                    EventResult::Consumed
                }
            }),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if matches!(self.mode, Mode::Browse | Mode::Filtering) {
            theme.border_focused()
        } else {
            theme.border()
        };
        let block = Block::default()
            .title(" Keybinds ")
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

        if let Some(error) = &self.load_error {
            self.render_unavailable(frame, inner, theme, error);
            return;
        }

        let show_filter = matches!(self.mode, Mode::Filtering) || !self.filter.is_empty();
        if show_filter {
            let [list_area, filter_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
            self.list.render(frame, list_area, theme);
            self.render_filter_bar(frame, filter_area, theme);
        } else {
            self.list.render(frame, inner, theme);
        }

        match &mut self.mode {
            Mode::Adding(input) | Mode::Editing { input, .. } => input.render(frame, area, theme),
            Mode::PickingSection { list, .. } => {
                Self::render_section_picker(list, frame, area, theme);
            }
            Mode::ConfirmingDelete { dialog, .. } => dialog.render(frame, area, theme),
            Mode::Browse | Mode::Filtering => {}
        }
    }
}

impl Tab for KeybindsTab {
    fn title(&self) -> &'static str {
        "Keybinds"
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let r = &self.resolver;
        vec![
            Keybinding::hint(r.display_keybinds(KeybindsAction::Add), "Add keybind"),
            Keybinding::hint(r.display_keybinds(KeybindsAction::Edit), "Edit keybind"),
            Keybinding::hint(r.display_keybinds(KeybindsAction::Delete), "Delete keybind"),
            Keybinding::hint(r.display_keybinds(KeybindsAction::Reload), "Reload file"),
            Keybinding::hint(r.display_search(SearchAction::Toggle), "Filter"),
            Keybinding::new(r.display_search(SearchAction::Exit), "Clear filter"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    r.display_nav(NavAction::PageUp),
                    r.display_nav(NavAction::PageDown)
                ),
                "Page up/down",
            ),
            Keybinding::new(
                format!(
                    "{}/{}",
                    r.display_nav(NavAction::Home),
                    r.display_nav(NavAction::End)
                ),
                "First/last",
            ),
        ]
    }

    fn status(&self) -> Vec<(&'static str, String)> {
        let mut status = Vec::new();
        match &self.editor {
            Some(editor) => {
                status.push(("file", editor.path().display().to_string()));
                let document = editor.document();
                status.push(("sections", document.sections.len().to_string()));
                status.push(("entries", document.entry_count().to_string()));
            }
            None => {
                status.push(("file", self.path.display().to_string()));
                status.push(("state", "unavailable".to_string()));
            }
        }
        if !self.filter.is_empty() {
            status.push(("filter", self.filter.clone()));
        }
        status
    }

    fn handle_paste(&mut self, text: &str) {
        match &mut self.mode {
            Mode::Adding(input) | Mode::Editing { input, .. } => input.handle_paste(text),
            Mode::Filtering => {
                self.filter
                    .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
                self.refresh_rows();
            }
            _ => {}
        }
    }
}
