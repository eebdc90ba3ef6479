//! Task state manager.
//!
//! # Responsibility
//! - Own the authoritative in-memory task collection.
//! - Apply create/update/delete/toggle mutations and trigger persistence.
//! - Derive filtered, due-date-sorted views and aggregate statistics.
//! - Notify registered observers after each successful mutation.
//!
//! # Invariants
//! - Task ids are unique within the collection.
//! - Storage order is insertion order; display order is always re-derived
//!   by ascending due date and never persisted.
//! - Persistence is best-effort: a failed save is logged and the in-memory
//!   state stays authoritative (no rollback).
//! - Mutations take `&mut self`; the single-writer rule is enforced by the
//!   borrow checker as long as the manager has one owner.

use crate::event::{TaskEvent, TaskObserver};
use crate::model::task::{Category, Priority, Task, TaskId};
use crate::service::statistics::TaskStatistics;
use crate::store::task_store::{StoreError, TaskStore};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Named predicate used to derive a display subset of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    /// Due on the current calendar day, any completion state.
    Today,
    /// Due strictly after the current time and not completed.
    Upcoming,
    Completed,
}

impl TaskFilter {
    /// All filters in display order.
    pub const ALL: [TaskFilter; 4] = [
        TaskFilter::All,
        TaskFilter::Today,
        TaskFilter::Upcoming,
        TaskFilter::Completed,
    ];

    /// Display title used by presentation tab/segment controls.
    pub fn title(&self) -> &'static str {
        match self {
            TaskFilter::All => "All Tasks",
            TaskFilter::Today => "Today",
            TaskFilter::Upcoming => "Upcoming",
            TaskFilter::Completed => "Completed",
        }
    }
}

/// Authoritative owner of the task collection.
///
/// Constructed once per process with an injected store and passed explicitly
/// to every consumer; there is no ambient singleton. Presentation only reads
/// snapshots returned by the accessor methods.
pub struct TaskManager<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
    observers: Vec<Arc<dyn TaskObserver>>,
}

impl<S: TaskStore> TaskManager<S> {
    /// Creates a manager and synchronously restores persisted state.
    ///
    /// Load failures are never fatal: a malformed blob is discarded and the
    /// manager starts from an empty collection (the blob is overwritten on
    /// the next successful save).
    pub fn new(store: S) -> Self {
        let tasks = match store.load() {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=service status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Err(StoreError::Decode(err)) => {
                warn!(
                    "event=tasks_load module=service status=recovered error_code=decode_failed error={err}"
                );
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=service status=error error_code=load_failed error={err}"
                );
                Vec::new()
            }
        };

        Self {
            store,
            tasks,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for mutation events.
    pub fn subscribe(&mut self, observer: Arc<dyn TaskObserver>) {
        self.observers.push(observer);
    }

    /// Appends a task to the collection.
    ///
    /// A candidate whose id already exists in the collection is assigned a
    /// fresh id, keeping ids unique.
    pub fn add_task(&mut self, candidate: Task) {
        let mut task = candidate;
        if self.index_of(task.id).is_some() {
            task.id = Uuid::new_v4();
        }
        let id = task.id;

        self.tasks.push(task);
        self.persist();
        self.notify(TaskEvent::Added(id));
    }

    /// Removes the task with the given id.
    ///
    /// Silent no-op when no task matches; nothing is persisted or announced.
    pub fn delete_task(&mut self, id: TaskId) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        self.tasks.remove(index);
        self.persist();
        self.notify(TaskEvent::Deleted(id));
    }

    /// Flips the completion flag of the task with the given id.
    ///
    /// Silent no-op when no task matches. The emitted event carries the
    /// completion state the task ended up in.
    pub fn toggle_completion(&mut self, id: TaskId) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        self.tasks[index].toggle_completion();
        let is_completed = self.tasks[index].is_completed;
        self.persist();
        self.notify(TaskEvent::StatusChanged { id, is_completed });
    }

    /// Replaces the task whose id matches `updated.id` wholesale.
    ///
    /// Silent no-op when no task matches.
    pub fn update_task(&mut self, updated: Task) {
        let Some(index) = self.index_of(updated.id) else {
            return;
        };

        let id = updated.id;
        self.tasks[index] = updated;
        self.persist();
        self.notify(TaskEvent::Updated(id));
    }

    /// Read-only snapshot of the collection in storage (insertion) order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.index_of(id).map(|index| &self.tasks[index])
    }

    /// Derives the filtered view sorted ascending by due date.
    pub fn filtered_tasks(&self, filter: TaskFilter) -> Vec<Task> {
        self.filtered_tasks_at(filter, Utc::now())
    }

    /// Derives the filtered view relative to an explicit `now`.
    ///
    /// Always returns a fresh, sorted sequence; the stored collection is
    /// never reordered.
    pub fn filtered_tasks_at(&self, filter: TaskFilter, now: DateTime<Utc>) -> Vec<Task> {
        let mut selected: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| match filter {
                TaskFilter::All => true,
                TaskFilter::Today => task.is_due_on_day_of(now),
                TaskFilter::Upcoming => task.due_date > now && !task.is_completed,
                TaskFilter::Completed => task.is_completed,
            })
            .cloned()
            .collect();

        selected.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        selected
    }

    /// Statistics over the full collection.
    pub fn statistics(&self) -> TaskStatistics {
        self.statistics_at(Utc::now())
    }

    /// Statistics over the full collection relative to an explicit `now`.
    pub fn statistics_at(&self, now: DateTime<Utc>) -> TaskStatistics {
        TaskStatistics::compute(&self.tasks, now)
    }

    /// Statistics over the subset selected by `filter`.
    pub fn filtered_statistics(&self, filter: TaskFilter) -> TaskStatistics {
        self.filtered_statistics_at(filter, Utc::now())
    }

    /// Statistics over the subset selected by `filter` relative to `now`.
    pub fn filtered_statistics_at(&self, filter: TaskFilter, now: DateTime<Utc>) -> TaskStatistics {
        TaskStatistics::compute(&self.filtered_tasks_at(filter, now), now)
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_completed).count()
    }

    /// Incomplete tasks whose due date is strictly before the current time.
    pub fn overdue_count(&self) -> usize {
        self.overdue_count_at(Utc::now())
    }

    pub fn overdue_count_at(&self, now: DateTime<Utc>) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.is_overdue_at(now))
            .count()
    }

    /// `completed / total` over the full collection, 0 when empty.
    pub fn completion_rate(&self) -> f64 {
        if self.tasks.is_empty() {
            0.0
        } else {
            self.completed_count() as f64 / self.tasks.len() as f64
        }
    }

    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.priority == priority)
            .count()
    }

    pub fn count_by_category(&self, category: Category) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.category == category)
            .count()
    }

    fn index_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Best-effort write-through of the full collection.
    ///
    /// Failure leaves the in-memory state ahead of the persisted snapshot
    /// until the next successful save.
    fn persist(&self) {
        if let Err(err) = self.store.save(&self.tasks) {
            error!(
                "event=tasks_save module=service status=error error_code=save_failed error={err}"
            );
        }
    }

    fn notify(&self, event: TaskEvent) {
        info!("event={} module=service status=ok", event.name());
        for observer in &self.observers {
            observer.on_task_event(&event);
        }
    }
}
