//! Shared constants for the TUI to keep layout, text and timing in sync.

/// Interval in milliseconds between UI ticks.
pub const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 3;
/// Heading shown above the entry form.
pub const APP_TITLE: &str = "My Todo App";
/// Placeholder shown in the entry form while the draft is empty.
pub const ENTRY_PLACEHOLDER: &str = "Add a new task...";
/// Label of the entry form's submit control.
pub const ADD_BUTTON_LABEL: &str = "[ Add ]";
/// Message shown instead of rows when the collection is empty.
pub const EMPTY_LIST_MESSAGE: &str = "No todos yet. Add one to get started!";
/// Label of each row's delete control.
pub const DELETE_BUTTON_LABEL: &str = "[Delete Task]";
/// Checkbox drawn for incomplete tasks.
pub const CHECKBOX_UNCHECKED: &str = "[ ]";
/// Checkbox drawn for completed tasks.
pub const CHECKBOX_CHECKED: &str = "[x]";
/// Display class carried by completed rows.
pub const COMPLETED_CLASS: &str = "completed";
/// Highlight symbol shown beside the selected row.
pub const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Gap between key hints in the footer.
pub const HINT_SEPARATOR: &str = "  ";
