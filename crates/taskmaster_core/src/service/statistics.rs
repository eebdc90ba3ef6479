//! Aggregate statistics derived from a task collection.
//!
//! # Responsibility
//! - Compute totals, completion rate, overdue count, and priority/category
//!   distributions over any slice of tasks.
//!
//! # Invariants
//! - Computation is pure; it never mutates or reorders the input.
//! - `completion_rate` is 0 for an empty collection.

use crate::model::task::{Category, Priority, Task};
use chrono::{DateTime, Utc};

/// Aggregate view over a task collection.
///
/// The scope is whatever slice the caller passes in: the full collection or
/// a filtered subset. Both are valid views and presentation uses each at
/// different points.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatistics {
    pub total_count: usize,
    pub completed_count: usize,
    /// Incomplete tasks whose due date is strictly before `now`.
    pub overdue_count: usize,
    /// `completed_count / total_count`, 0 when the collection is empty.
    pub completion_rate: f64,
    /// Counts per priority in `Priority::ALL` order.
    pub priority_distribution: Vec<(Priority, usize)>,
    /// Counts per category in `Category::ALL` order.
    pub category_distribution: Vec<(Category, usize)>,
}

impl TaskStatistics {
    /// Computes statistics over `tasks` relative to `now`.
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let total_count = tasks.len();
        let completed_count = tasks.iter().filter(|task| task.is_completed).count();
        let overdue_count = tasks.iter().filter(|task| task.is_overdue_at(now)).count();

        let completion_rate = if total_count == 0 {
            0.0
        } else {
            completed_count as f64 / total_count as f64
        };

        let priority_distribution = Priority::ALL
            .iter()
            .map(|&priority| {
                let count = tasks.iter().filter(|task| task.priority == priority).count();
                (priority, count)
            })
            .collect();

        let category_distribution = Category::ALL
            .iter()
            .map(|&category| {
                let count = tasks.iter().filter(|task| task.category == category).count();
                (category, count)
            })
            .collect();

        Self {
            total_count,
            completed_count,
            overdue_count,
            completion_rate,
            priority_distribution,
            category_distribution,
        }
    }
}
