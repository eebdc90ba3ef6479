//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record consumed by list and statistics views.
//! - Define the closed priority/category vocabularies and their display
//!   metadata.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `is_completed` is the sole source of truth for completion state.
//! - Wire field names are fixed; persisted blobs from older builds must keep
//!   decoding (missing `reminderEnabled` defaults to `false`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Urgency level attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities in display order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Human-readable label, identical to the wire value.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Theme color asset identifier consumed by presentation.
    pub fn color(&self) -> &'static str {
        match self {
            Priority::Low => "priorityLow",
            Priority::Medium => "priorityMedium",
            Priority::High => "priorityHigh",
        }
    }
}

/// Grouping tag attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Personal,
    Work,
    Shopping,
    Health,
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Shopping,
        Category::Health,
        Category::Other,
    ];

    /// Human-readable label, identical to the wire value.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    /// Symbol icon identifier consumed by presentation.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Personal => "person.fill",
            Category::Work => "briefcase.fill",
            Category::Shopping => "cart.fill",
            Category::Health => "heart.fill",
            Category::Other => "square.fill",
        }
    }
}

/// Canonical to-do record.
///
/// Pure value type: equality by value, no validation. A non-empty `title` is
/// a caller contract enforced before creation, not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID, assigned at creation.
    pub id: TaskId,
    pub title: String,
    /// Free-form body text, may be empty.
    pub description: String,
    /// Due moment (date + time), arbitrary past or future.
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    pub priority: Priority,
    pub category: Category,
    /// Added after the first persisted revision; older blobs omit it.
    #[serde(default)]
    pub reminder_enabled: bool,
}

impl Task {
    /// Creates a task with a generated stable ID and default attributes.
    ///
    /// Defaults: empty description, not completed, `Priority::Medium`,
    /// `Category::Personal`, reminder off.
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), title, due_date)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by load/import paths where identity already exists.
    pub fn with_id(id: TaskId, title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            due_date,
            is_completed: false,
            priority: Priority::default(),
            category: Category::default(),
            reminder_enabled: false,
        }
    }

    /// Flips the completion flag in place.
    pub fn toggle_completion(&mut self) {
        self.is_completed = !self.is_completed;
    }

    /// Returns whether this task is overdue relative to `now`.
    ///
    /// Completed tasks are never overdue.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.due_date < now
    }

    /// Returns whether the due date falls on the same calendar day as `now`.
    pub fn is_due_on_day_of(&self, now: DateTime<Utc>) -> bool {
        self.due_date.date_naive() == now.date_naive()
    }
}
