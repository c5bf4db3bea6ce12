use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use todo_core::{TaskId, TodoStore};
use tracing::debug;

use super::constants::{APP_TITLE, HINT_SEPARATOR, UI_MESSAGE_TTL_SECS};
use super::entry_form::EntryForm;
use super::list_view;
use super::util::{fit_segments, truncate_with_ellipsis};
use crate::config::{Action, KeyBindingsConfig, ViewType};

/// Request raised by a child view for the state owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Intent {
    /// Append a task with this text.
    Add(String),
    /// Flip completion of a task.
    Toggle(TaskId),
    /// Remove a task.
    Delete(TaskId),
}

/// Which child view receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    /// Keys edit the draft.
    Form,
    /// Keys move the cursor and activate row controls.
    List,
}

/// Root view: owns the store and wires the entry form and list view to it.
pub(super) struct Ui {
    pub(super) store: TodoStore,
    pub(super) form: EntryForm,
    /// Cursor into the current snapshot; meaningful only when it is non-empty.
    pub(super) selected: usize,
    pub(super) focus: Focus,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    pub(super) keybindings: KeyBindingsConfig,
    dirty: Rc<Cell<bool>>,
}

impl Ui {
    pub(super) const TITLE_HEIGHT: u16 = 3;
    pub(super) const FORM_HEIGHT: u16 = 3;
    pub(super) const LIST_MIN_HEIGHT: u16 = 3;
    pub(super) const FOOTER_HEIGHT: u16 = 2;

    pub(super) fn new(keybindings: KeyBindingsConfig) -> Self {
        Self::with_store(TodoStore::new(), keybindings)
    }

    pub(super) fn with_store(mut store: TodoStore, keybindings: KeyBindingsConfig) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        store.subscribe(move |_| flag.set(true));
        Self {
            store,
            form: EntryForm::default(),
            selected: 0,
            focus: Focus::Form,
            message: None,
            should_quit: false,
            keybindings,
            dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub(super) fn take_redraw(&self) -> bool {
        self.dirty.replace(false)
    }

    pub(super) fn request_redraw(&self) {
        self.dirty.set(true);
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let intent = match self.focus {
            Focus::Form => self.handle_form_key(&key),
            Focus::List => self.handle_list_key(&key),
        };
        if let Some(intent) = intent {
            self.apply(intent);
        }
        self.request_redraw();
    }

    pub(super) fn handle_paste(&mut self, text: &str) {
        if self.focus == Focus::Form {
            self.form.paste(text);
            self.request_redraw();
        }
    }

    fn handle_form_key(&mut self, key: &KeyEvent) -> Option<Intent> {
        if self.keybindings.matches(ViewType::EntryForm, Action::Submit, key) {
            return self.form.submit();
        }
        if self.keybindings.matches(ViewType::EntryForm, Action::FocusList, key) {
            self.focus = Focus::List;
            return None;
        }
        if !self.form.edit(key) {
            debug!(?key, "unbound key in entry form");
        }
        None
    }

    fn handle_list_key(&mut self, key: &KeyEvent) -> Option<Intent> {
        if self.keybindings.matches(ViewType::TaskList, Action::Quit, key) {
            self.should_quit = true;
            return None;
        }
        if self.keybindings.matches(ViewType::TaskList, Action::FocusForm, key) {
            self.focus = Focus::Form;
            return None;
        }
        if self.keybindings.matches(ViewType::TaskList, Action::Down, key) {
            self.select_next();
            return None;
        }
        if self.keybindings.matches(ViewType::TaskList, Action::Up, key) {
            self.select_prev();
            return None;
        }
        if self.keybindings.matches(ViewType::TaskList, Action::Toggle, key) {
            return list_view::row_at(self.store.snapshot(), self.selected).map(|row| row.toggle());
        }
        if self.keybindings.matches(ViewType::TaskList, Action::Delete, key) {
            return list_view::row_at(self.store.snapshot(), self.selected).map(|row| row.delete());
        }
        debug!(?key, "unbound key in task list");
        None
    }

    /// Forward an intent to the store and keep the cursor inside the new snapshot.
    pub(super) fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Add(text) => {
                if self.store.add(&text).is_some() {
                    self.info("Task added");
                }
            }
            Intent::Toggle(id) => {
                self.store.toggle(id);
            }
            Intent::Delete(id) => {
                if self.store.delete(id) {
                    self.info("Task deleted");
                }
            }
        }
        self.clamp_selection();
    }

    fn select_next(&mut self) {
        let len = self.store.snapshot().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    fn select_prev(&mut self) {
        let len = self.store.snapshot().len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.snapshot().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::TITLE_HEIGHT),
                Constraint::Length(Self::FORM_HEIGHT),
                Constraint::Min(Self::LIST_MIN_HEIGHT),
                Constraint::Length(Self::FOOTER_HEIGHT),
            ])
            .split(f.area());

        let title = Paragraph::new(Line::from(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(title, chunks[0]);

        self.form.draw(f, chunks[1], self.focus == Focus::Form);
        list_view::draw(
            f,
            chunks[2],
            self.store.snapshot(),
            self.selected,
            self.focus == Focus::List,
        );
        self.draw_footer(f, chunks[3]);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let hints = Line::from(Span::styled(
            fit_segments(&self.hint_segments(), HINT_SEPARATOR, usize::from(area.width)),
            Style::default().fg(Color::DarkGray),
        ));
        let status = self
            .message
            .as_ref()
            .map_or_else(Line::default, |msg| {
                Line::from(Span::styled(
                    truncate_with_ellipsis(&msg.text, usize::from(area.width)),
                    Style::default().fg(Color::Green),
                ))
            });
        f.render_widget(Paragraph::new(vec![hints, status]), area);
    }

    /// Key hints for the focused view, most useful first.
    pub(super) fn hint_segments(&self) -> Vec<String> {
        let kb = &self.keybindings;
        match self.focus {
            Focus::Form => vec![
                format!("{}: add", kb.hint(ViewType::EntryForm, Action::Submit)),
                format!("{}: list", kb.hint(ViewType::EntryForm, Action::FocusList)),
                "Ctrl+c: quit".to_owned(),
            ],
            Focus::List => vec![
                format!(
                    "{}/{}: move",
                    kb.hint(ViewType::TaskList, Action::Down),
                    kb.hint(ViewType::TaskList, Action::Up),
                ),
                format!("{}: toggle", kb.hint(ViewType::TaskList, Action::Toggle)),
                format!("{}: delete", kb.hint(ViewType::TaskList, Action::Delete)),
                format!("{}: quit", kb.hint(ViewType::TaskList, Action::Quit)),
                format!("{}: new task", kb.hint(ViewType::TaskList, Action::FocusForm)),
            ],
        }
    }

    pub(super) fn hint_text(&self) -> String {
        self.hint_segments().join(HINT_SEPARATOR)
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn tick(&mut self) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
            self.request_redraw();
        }
    }
}

pub(super) struct Message {
    pub(super) text: String,
    created_at: Instant,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
