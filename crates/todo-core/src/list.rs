use std::sync::Arc;

use crate::id::TaskId;
use crate::task::{Task, TaskText};

/// Immutable snapshot of the task collection in insertion order.
///
/// Every mutation builds a new snapshot. Records that a mutation does not
/// touch are shared with the previous snapshot, so they keep both their
/// position and their identity (`Arc::ptr_eq`).
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Arc<[Arc<Task>]>,
}

impl TaskList {
    /// Empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Task> + '_ {
        self.tasks.iter().map(|task| &**task)
    }

    /// Shared handles to the records, for callers that care about identity.
    #[must_use]
    pub fn entries(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    /// Record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index).map(|task| &**task)
    }

    /// Look up a record by id.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.position(id).and_then(|index| self.get(index))
    }

    /// Index of the record with `id`.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Snapshot with a new incomplete task appended, plus the new task's id.
    #[must_use]
    pub fn with_added(&self, text: TaskText) -> (Self, TaskId) {
        let task = Task::new(text);
        let id = task.id;
        let tasks = self
            .tasks
            .iter()
            .cloned()
            .chain(std::iter::once(Arc::new(task)))
            .collect();
        (Self { tasks }, id)
    }

    /// Snapshot with the completion of `id` inverted, or `None` if `id` is unknown.
    #[must_use]
    pub fn with_toggled(&self, id: TaskId) -> Option<Self> {
        let index = self.position(id)?;
        let tasks = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                if i == index {
                    Arc::new(task.toggled())
                } else {
                    Arc::clone(task)
                }
            })
            .collect();
        Some(Self { tasks })
    }

    /// Snapshot without `id`, or `None` if `id` is unknown.
    #[must_use]
    pub fn without(&self, id: TaskId) -> Option<Self> {
        self.position(id)?;
        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        Some(Self { tasks })
    }
}

impl PartialEq for TaskList {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for TaskList {}
