use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use todo_core::is_blank;

use super::constants::{ADD_BUTTON_LABEL, ENTRY_PLACEHOLDER};
use super::util::{display_width, pop_grapheme};
use super::view::Intent;

/// Input surface for new tasks. Its only state is the draft text.
#[derive(Debug, Default)]
pub(super) struct EntryForm {
    draft: String,
}

impl EntryForm {
    const BUTTON_WIDTH: u16 = 9;

    pub(super) fn draft(&self) -> &str {
        &self.draft
    }

    /// Append pasted text verbatim.
    pub(super) fn paste(&mut self, text: &str) {
        self.draft.push_str(text);
    }

    /// Apply an editing key. Returns `false` for keys that are not text edits.
    pub(super) fn edit(&mut self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) => {
                self.draft.push(ch);
                true
            }
            KeyCode::Backspace => {
                pop_grapheme(&mut self.draft);
                true
            }
            _ => false,
        }
    }

    /// Submit the draft.
    ///
    /// A blank draft is left as is and yields nothing. Otherwise the draft is
    /// handed over untrimmed and the field is cleared.
    pub(super) fn submit(&mut self) -> Option<Intent> {
        if is_blank(&self.draft) {
            return None;
        }
        Some(Intent::Add(std::mem::take(&mut self.draft)))
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>, area: Rect, focused: bool) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(Self::BUTTON_WIDTH)])
            .split(area);

        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let input = if self.draft.is_empty() {
            Line::from(Span::styled(
                ENTRY_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.draft.as_str())
        };
        let block = Block::default().borders(Borders::ALL).border_style(border_style);
        let inner = block.inner(columns[0]);
        f.render_widget(Paragraph::new(input).block(block), columns[0]);

        let button = Paragraph::new(Line::from(Span::styled(
            ADD_BUTTON_LABEL,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, columns[1]);

        if focused {
            let typed = u16::try_from(display_width(&self.draft)).unwrap_or(u16::MAX);
            let x = inner
                .x
                .saturating_add(typed)
                .min(inner.right().saturating_sub(1));
            f.set_cursor_position(Position::new(x, inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut EntryForm, text: &str) {
        for ch in text.chars() {
            assert!(form.edit(&key(KeyCode::Char(ch))));
        }
    }

    #[test]
    fn typing_appends_verbatim() {
        let mut form = EntryForm::default();
        type_text(&mut form, "  New task ");
        assert_eq!(form.draft(), "  New task ");
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut form = EntryForm::default();
        form.paste("cafe\u{0301}");
        assert!(form.edit(&key(KeyCode::Backspace)));
        assert_eq!(form.draft(), "caf");
    }

    #[test]
    fn control_chords_are_not_edits() {
        let mut form = EntryForm::default();
        let chord = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!form.edit(&chord));
        assert!(!form.edit(&key(KeyCode::Enter)));
        assert_eq!(form.draft(), "");
    }

    #[test]
    fn submit_forwards_untrimmed_draft_and_clears() {
        let mut form = EntryForm::default();
        form.paste("  buy milk  ");
        assert_eq!(form.submit(), Some(Intent::Add("  buy milk  ".into())));
        assert_eq!(form.draft(), "");
    }

    #[test]
    fn submit_suppresses_blank_draft() {
        let mut form = EntryForm::default();
        assert_eq!(form.submit(), None);

        form.paste("   ");
        assert_eq!(form.submit(), None);
        assert_eq!(form.draft(), "   ");
    }
}
