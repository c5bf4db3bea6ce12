//! In-memory task list: records, snapshots and the state owner that mutates them.

/// Identifier types.
pub mod id;
/// Immutable collection snapshots.
pub mod list;
/// State owner with the add/toggle/delete operations.
pub mod store;
/// Task records and text validation.
pub mod task;

pub use id::TaskId;
pub use list::TaskList;
pub use store::TodoStore;
pub use task::{Task, TaskError, TaskText, is_blank};
