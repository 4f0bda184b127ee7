//! `TaskStore`: the single authoritative task list.
//!
//! Holds a flat `Vec<Task>` plus a list of registered observers, generalized
//! from the teacher's DB-backed repository-and-notify pattern down to a
//! synchronous in-memory notify list, since the engine itself never touches
//! I/O. Every mutating method re-sorts scheduled tasks by `start_date_time`
//! and then calls every observer before returning.

use crate::domain::models::task::{Task, TaskId};
use crate::domain::ports::ChangeObserver;

/// The in-memory store of all tasks, scheduled and unscheduled.
pub struct TaskStore {
    tasks: Vec<Task>,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Seeds the store from a loaded snapshot. Does not notify observers
    /// (there is nothing to react to yet at startup).
    pub fn seed(tasks: Vec<Task>) -> Self {
        let mut store = Self {
            tasks,
            observers: Vec::new(),
        };
        store.resort();
        store.assert_invariants();
        store
    }

    pub fn register_observer(&mut self, observer: Box<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    pub fn get_all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn get_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Replaces the entire task list wholesale (used to apply a cascade
    /// plan atomically alongside an insert/update).
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.resort();
        self.assert_invariants();
        self.notify();
    }

    /// Inserts a new task or overwrites an existing one with the same id.
    pub fn upsert(&mut self, task: Task) {
        match self.tasks.iter().position(|t| t.id() == task.id()) {
            Some(index) => self.tasks[index] = task,
            None => self.tasks.push(task),
        }
        self.resort();
        self.assert_invariants();
        self.notify();
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.get_index(id)?;
        let removed = self.tasks.remove(index);
        self.assert_invariants();
        self.notify();
        Some(removed)
    }

    pub fn set_editing(&mut self, id: TaskId, editing: bool) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id() == id) {
            if let Some(scheduled) = task.as_scheduled_mut() {
                scheduled.editing = editing;
            }
        }
        self.notify();
    }

    pub fn set_inline_editing(&mut self, id: TaskId, editing: bool) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id() == id) {
            if let Some(unscheduled) = task.as_unscheduled_mut() {
                unscheduled.is_editing_inline = editing;
            }
        }
        self.notify();
    }

    pub fn set_confirming_delete(&mut self, id: TaskId, confirming: bool) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id() == id) {
            task.set_confirming_delete(confirming);
        }
        self.notify();
    }

    fn resort(&mut self) {
        // Stable sort: unscheduled tasks (no natural sort key here) keep
        // their relative insertion order, and scheduled tasks sort by
        // start_date_time among themselves, per spec's store invariant.
        self.tasks.sort_by(|a, b| match (a.as_scheduled(), b.as_scheduled()) {
            (Some(a), Some(b)) => a.start_date_time.cmp(&b.start_date_time),
            _ => std::cmp::Ordering::Equal,
        });
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.on_change(&self.tasks);
        }
    }

    /// Internal invariant breaches are fatal programming errors; assert
    /// them in debug builds rather than handle them as recoverable.
    fn assert_invariants(&self) {
        debug_assert!(self.is_sorted_by_start(), "scheduled tasks out of start order");
        debug_assert!(self.ids_are_unique(), "duplicate task id in store");
        debug_assert!(self.no_unlocked_overlaps(), "overlapping unlocked scheduled tasks");
    }

    fn is_sorted_by_start(&self) -> bool {
        self.tasks
            .iter()
            .filter_map(Task::as_scheduled)
            .map(|t| t.start_date_time)
            .is_sorted()
    }

    fn ids_are_unique(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.tasks.len());
        self.tasks.iter().all(|t| seen.insert(t.id()))
    }

    fn no_unlocked_overlaps(&self) -> bool {
        let candidates: Vec<_> = self
            .tasks
            .iter()
            .filter_map(Task::as_scheduled)
            .filter(|t| !t.is_completed() && !t.locked && !t.editing)
            .collect();
        for (i, a) in candidates.iter().enumerate() {
            for b in &candidates[i + 1..] {
                if b.editing || a.editing {
                    continue;
                }
                if a.interval().overlaps(&b.interval()) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::task::{ScheduledTask, TaskStatus};
    use crate::domain::time_math::from_date_and_hhmm;

    fn scheduled(start: &str, end: &str) -> ScheduledTask {
        let start_date_time = from_date_and_hhmm("2025-01-15", start).unwrap();
        let end_date_time = from_date_and_hhmm("2025-01-15", end).unwrap();
        ScheduledTask {
            id: TaskId::new(),
            description: "task".to_string(),
            start_date_time,
            end_date_time,
            duration: end_date_time - start_date_time,
            status: TaskStatus::Incomplete,
            locked: false,
            editing: false,
            confirming_delete: false,
        }
    }

    #[test]
    fn upsert_keeps_scheduled_tasks_sorted_by_start() {
        let mut store = TaskStore::new();
        let late = scheduled("11:00", "12:00");
        let early = scheduled("09:00", "10:00");
        store.upsert(Task::Scheduled(late.clone()));
        store.upsert(Task::Scheduled(early.clone()));

        let ids: Vec<TaskId> = store.get_all().iter().map(Task::id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[test]
    fn remove_drops_the_task_and_nothing_else() {
        let mut store = TaskStore::new();
        let a = scheduled("09:00", "10:00");
        let b = scheduled("10:00", "11:00");
        store.upsert(Task::Scheduled(a.clone()));
        store.upsert(Task::Scheduled(b.clone()));

        store.remove(a.id);
        assert_eq!(store.get_all().len(), 1);
        assert!(store.get_by_id(b.id).is_some());
        assert!(store.get_by_id(a.id).is_none());
    }

    #[test]
    fn get_index_reflects_current_sort_order() {
        let mut store = TaskStore::new();
        let late = scheduled("11:00", "12:00");
        let early = scheduled("09:00", "10:00");
        store.upsert(Task::Scheduled(late.clone()));
        store.upsert(Task::Scheduled(early.clone()));

        assert_eq!(store.get_index(early.id), Some(0));
        assert_eq!(store.get_index(late.id), Some(1));
    }
}
