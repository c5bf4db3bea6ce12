//! Read-only rendering of the task collection.
//!
//! Everything here is derived from the snapshot passed in; the view keeps no
//! state between draws. User activations become [`Intent`]s carrying the
//! task id, which the root view applies.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use todo_core::{Task, TaskId, TaskList};

use super::constants::{
    CHECKBOX_CHECKED, CHECKBOX_UNCHECKED, COMPLETED_CLASS, DELETE_BUTTON_LABEL, EMPTY_LIST_MESSAGE,
    TASK_LIST_HIGHLIGHT_SYMBOL,
};
use super::util::{display_width, truncate_with_ellipsis};
use super::view::Intent;

/// Display model of one task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row<'a> {
    pub(super) id: TaskId,
    pub(super) text: &'a str,
    pub(super) completed: bool,
}

impl<'a> Row<'a> {
    fn new(task: &'a Task) -> Self {
        Self {
            id: task.id,
            text: &task.text,
            completed: task.completed,
        }
    }

    pub(super) const fn checkbox(&self) -> &'static str {
        if self.completed {
            CHECKBOX_CHECKED
        } else {
            CHECKBOX_UNCHECKED
        }
    }

    /// Display class derived from the completion flag.
    pub(super) const fn class(&self) -> Option<&'static str> {
        if self.completed {
            Some(COMPLETED_CLASS)
        } else {
            None
        }
    }

    /// Intent raised by activating the checkbox.
    pub(super) const fn toggle(&self) -> Intent {
        Intent::Toggle(self.id)
    }

    /// Intent raised by activating the delete control.
    pub(super) const fn delete(&self) -> Intent {
        Intent::Delete(self.id)
    }

    fn text_style(&self) -> Style {
        if self.class().is_some() {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default()
        }
    }

    fn to_line(self, text_width: usize) -> Line<'a> {
        Line::from(vec![
            Span::raw(self.checkbox()),
            Span::raw(" "),
            Span::styled(truncate_with_ellipsis(self.text, text_width), self.text_style()),
            Span::raw(" "),
            Span::styled(DELETE_BUTTON_LABEL, Style::default().fg(Color::Red)),
        ])
    }
}

/// What the list shows for a snapshot.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum ListContent<'a> {
    /// The collection is empty.
    Empty(&'static str),
    /// One row per task, in collection order.
    Rows(Vec<Row<'a>>),
}

pub(super) fn content(tasks: &TaskList) -> ListContent<'_> {
    if tasks.is_empty() {
        ListContent::Empty(EMPTY_LIST_MESSAGE)
    } else {
        ListContent::Rows(tasks.iter().map(Row::new).collect())
    }
}

/// Row at `index`, if the snapshot has one.
pub(super) fn row_at(tasks: &TaskList, index: usize) -> Option<Row<'_>> {
    tasks.get(index).map(Row::new)
}

pub(super) fn draw(f: &mut Frame<'_>, area: Rect, tasks: &TaskList, selected: usize, focused: bool) {
    let title = format!("Tasks ({})", tasks.len());
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    match content(tasks) {
        ListContent::Empty(message) => {
            let empty = Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(empty, area);
        }
        ListContent::Rows(rows) => {
            let text_width = text_budget(block.inner(area).width);
            let items: Vec<ListItem<'_>> = rows
                .into_iter()
                .map(|row| ListItem::new(row.to_line(text_width)))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
            let mut state = ListState::default();
            if focused {
                state.select(Some(selected));
            }
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}

/// Terminal columns left for the task text after the highlight symbol, checkbox,
/// delete control and separators.
fn text_budget(inner_width: u16) -> usize {
    let fixed = display_width(TASK_LIST_HIGHLIGHT_SYMBOL)
        + display_width(CHECKBOX_CHECKED)
        + display_width(DELETE_BUTTON_LABEL)
        + 2;
    usize::from(inner_width).saturating_sub(fixed).max(1)
}
