use thiserror::Error;

use crate::id::TaskId;

/// Reasons a task record cannot be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The submitted text is empty once surrounding whitespace is ignored.
    #[error("task text must contain a non-whitespace character")]
    BlankText,
}

/// Validated, non-blank task text.
///
/// The original input is kept verbatim (including surrounding whitespace);
/// only the emptiness check looks at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskText(String);

impl TaskText {
    /// Validate `raw` and wrap it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::BlankText`] when `raw` is empty or whitespace only.
    pub fn new(raw: impl Into<String>) -> Result<Self, TaskError> {
        let raw = raw.into();
        if is_blank(&raw) {
            return Err(TaskError::BlankText);
        }
        Ok(Self(raw))
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<TaskText> for String {
    fn from(text: TaskText) -> Self {
        text.0
    }
}

/// Whether `text` would be rejected by [`TaskText::new`].
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// A single entry in the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Identifier assigned at creation.
    pub id: TaskId,
    /// Text as the user typed it.
    pub text: String,
    /// Whether the task has been marked done.
    pub completed: bool,
}

impl Task {
    /// Create an incomplete task with a fresh identifier.
    #[must_use]
    pub fn new(text: TaskText) -> Self {
        Self {
            id: TaskId::new(),
            text: text.into(),
            completed: false,
        }
    }

    /// Copy of this task with the completion flag inverted.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}
