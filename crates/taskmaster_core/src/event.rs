//! Mutation event contract between the task manager and presentation.
//!
//! # Responsibility
//! - Define the closed set of events announced after successful mutations.
//! - Define the observer interface presentation implements for transient
//!   feedback (toasts and similar).
//!
//! # Invariants
//! - Events fire at most once per mutation, after persistence was attempted.
//! - Correctness of data display never depends on events; derived views can
//!   always be re-read instead.

use crate::model::task::TaskId;

/// Event announced after each successful mutation of the task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    Added(TaskId),
    Deleted(TaskId),
    Updated(TaskId),
    /// Carries the completion state the task ended up in.
    StatusChanged { id: TaskId, is_completed: bool },
}

impl TaskEvent {
    /// Stable event name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Added(_) => "task_added",
            Self::Deleted(_) => "task_deleted",
            Self::Updated(_) => "task_updated",
            Self::StatusChanged { .. } => "task_status_changed",
        }
    }
}

/// Observer interface for task mutation events.
///
/// Implementations must not call back into the manager from
/// `on_task_event`; the manager is single-writer and may be mid-mutation.
pub trait TaskObserver {
    fn on_task_event(&self, event: &TaskEvent);
}
