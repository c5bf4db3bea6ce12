use std::fmt;

use tracing::{debug, info};

use crate::id::TaskId;
use crate::list::TaskList;
use crate::task::TaskText;

type Observer = Box<dyn FnMut(&TaskList)>;

/// Owner of the authoritative task collection.
///
/// `add`, `toggle` and `delete` are the only mutation paths. Each one that
/// changes anything swaps in a new [`TaskList`] snapshot and hands it to every
/// subscribed observer before returning. Requests that cannot apply (blank
/// text, unknown id) leave the snapshot untouched and notify nobody.
#[derive(Default)]
pub struct TodoStore {
    snapshot: TaskList,
    observers: Vec<Observer>,
}

impl TodoStore {
    /// Store with an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &TaskList {
        &self.snapshot
    }

    /// Register a callback invoked with every new snapshot.
    pub fn subscribe(&mut self, observer: impl FnMut(&TaskList) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Append a task unless `text` is blank; returns the new id when added.
    ///
    /// The stored text is `text` exactly as given, surrounding whitespace included.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let text = match TaskText::new(text) {
            Ok(text) => text,
            Err(err) => {
                debug!(%err, "ignoring add request");
                return None;
            }
        };
        let (next, id) = self.snapshot.with_added(text);
        info!(task = %id, "task added");
        self.publish(next);
        Some(id)
    }

    /// Flip the completion flag of `id`; returns whether a task was toggled.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let Some(next) = self.snapshot.with_toggled(id) else {
            debug!(task = %id, "ignoring toggle for unknown task");
            return false;
        };
        info!(task = %id, "task toggled");
        self.publish(next);
        true
    }

    /// Remove `id`; returns whether a task was removed.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(next) = self.snapshot.without(id) else {
            debug!(task = %id, "ignoring delete for unknown task");
            return false;
        };
        info!(task = %id, "task deleted");
        self.publish(next);
        true
    }

    fn publish(&mut self, next: TaskList) {
        self.snapshot = next;
        for observer in &mut self.observers {
            observer(&self.snapshot);
        }
    }
}

impl fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoStore")
            .field("snapshot", &self.snapshot)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn texts(store: &TodoStore) -> Vec<String> {
        store.snapshot().iter().map(|task| task.text.clone()).collect()
    }

    fn expect_some<T>(value: Option<T>, ctx: &str) -> T {
        value.map_or_else(|| panic!("{ctx}"), |inner| inner)
    }

    #[test]
    fn add_appends_incomplete_task_with_untrimmed_text() {
        let mut store = TodoStore::new();
        let id = expect_some(store.add("  buy milk  "), "non-blank text must be added");

        let task = expect_some(store.snapshot().find(id), "added task must be present");
        assert_eq!(task.text, "  buy milk  ");
        assert!(!task.completed);
    }

    #[test]
    fn add_ignores_blank_text() {
        let mut store = TodoStore::new();
        assert!(store.add("").is_none());
        assert!(store.add("   ").is_none());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn delete_first_of_two_leaves_second() {
        let mut store = TodoStore::new();
        let first = expect_some(store.add("Task 1"), "first task");
        store.add("Task 2");
        assert_eq!(texts(&store), vec!["Task 1", "Task 2"]);

        assert!(store.delete(first));
        assert_eq!(texts(&store), vec!["Task 2"]);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut store = TodoStore::new();
        let id = expect_some(store.add("Complete this task"), "task");
        let before = store.snapshot().clone();

        assert!(store.toggle(id));
        assert_eq!(store.snapshot().find(id).map(|t| t.completed), Some(true));
        assert!(store.toggle(id));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = TodoStore::new();
        store.add("Task");
        let before = store.snapshot().clone();

        assert!(!store.toggle(TaskId::new()));
        assert!(!store.delete(TaskId::new()));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn observers_see_each_applied_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = TodoStore::new();
        let sink = Rc::clone(&seen);
        store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.len()));

        let id = expect_some(store.add("Task"), "task");
        store.add("  ");
        store.toggle(id);
        store.toggle(TaskId::new());
        store.delete(id);

        assert_eq!(*seen.borrow(), vec![1, 1, 0]);
    }
}
