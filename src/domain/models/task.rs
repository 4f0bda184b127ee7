//! Task domain model.
//!
//! A [`Task`] is a closed sum of two shapes — a time-anchored
//! [`ScheduledTask`] and a priority-ordered [`UnscheduledTask`] — that
//! coexist in the same [`crate::store::TaskStore`]. Every operation that
//! depends on shape matches both variants exhaustively rather than
//! branching on a loose type tag.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::time_math::Instant;

/// Opaque, globally-unique task identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Completion status shared by both task shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Incomplete,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Incomplete
    }
}

/// Priority bucket for unscheduled backlog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A task pinned to a specific `[start_date_time, end_date_time)` interval.
///
/// Invariant: `end_date_time == start_date_time + duration` and
/// `duration > Duration::zero()`, enforced at construction by
/// [`super::validation::make_scheduled_task`] and never bypassed elsewhere
/// in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub description: String,
    pub start_date_time: Instant,
    pub end_date_time: Instant,
    pub duration: Duration,
    pub status: TaskStatus,
    pub locked: bool,
    /// Excluded from overlap detection and cascade shifting while true.
    pub editing: bool,
    pub confirming_delete: bool,
}

impl ScheduledTask {
    pub fn interval(&self) -> crate::domain::time_math::Interval {
        crate::domain::time_math::Interval::new(self.start_date_time, self.end_date_time)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// `start <= now < end`.
    pub fn is_currently_active(&self, now: Instant) -> bool {
        self.start_date_time <= now && now < self.end_date_time
    }

    /// `now > end`.
    pub fn is_running_late(&self, now: Instant) -> bool {
        now > self.end_date_time
    }
}

/// A backlog item with priority and an optional duration estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnscheduledTask {
    pub id: TaskId,
    pub description: String,
    pub priority: Priority,
    /// `None` means "no estimate"; a zero estimate is also stored as `None`
    /// per spec (a zero-minute estimate carries no information).
    pub est_duration: Option<Duration>,
    pub status: TaskStatus,
    pub is_editing_inline: bool,
    pub confirming_delete: bool,
}

/// A discrete unit of planned work: either pinned to the day's clock or
/// waiting in the backlog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Task {
    Scheduled(ScheduledTask),
    Unscheduled(UnscheduledTask),
}

impl Task {
    pub fn id(&self) -> TaskId {
        match self {
            Task::Scheduled(t) => t.id,
            Task::Unscheduled(t) => t.id,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Task::Scheduled(t) => &t.description,
            Task::Unscheduled(t) => &t.description,
        }
    }

    pub fn status(&self) -> TaskStatus {
        match self {
            Task::Scheduled(t) => t.status,
            Task::Unscheduled(t) => t.status,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status() == TaskStatus::Completed
    }

    pub fn confirming_delete(&self) -> bool {
        match self {
            Task::Scheduled(t) => t.confirming_delete,
            Task::Unscheduled(t) => t.confirming_delete,
        }
    }

    pub fn set_confirming_delete(&mut self, value: bool) {
        match self {
            Task::Scheduled(t) => t.confirming_delete = value,
            Task::Unscheduled(t) => t.confirming_delete = value,
        }
    }

    pub fn as_scheduled(&self) -> Option<&ScheduledTask> {
        match self {
            Task::Scheduled(t) => Some(t),
            Task::Unscheduled(_) => None,
        }
    }

    pub fn as_scheduled_mut(&mut self) -> Option<&mut ScheduledTask> {
        match self {
            Task::Scheduled(t) => Some(t),
            Task::Unscheduled(_) => None,
        }
    }

    pub fn as_unscheduled(&self) -> Option<&UnscheduledTask> {
        match self {
            Task::Unscheduled(t) => Some(t),
            Task::Scheduled(_) => None,
        }
    }

    pub fn as_unscheduled_mut(&mut self) -> Option<&mut UnscheduledTask> {
        match self {
            Task::Unscheduled(t) => Some(t),
            Task::Scheduled(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time_math::from_date_and_hhmm;

    fn scheduled(id: TaskId, start: &str, end: &str) -> ScheduledTask {
        let start_date_time = from_date_and_hhmm("2025-01-15", start).unwrap();
        let end_date_time = from_date_and_hhmm("2025-01-15", end).unwrap();
        ScheduledTask {
            id,
            description: "desc".to_string(),
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
    fn identity_is_stable_across_conversion() {
        let id = TaskId::new();
        let s = scheduled(id, "09:00", "10:00");
        let task = Task::Scheduled(s);
        assert_eq!(task.id(), id);
    }

    #[test]
    fn running_late_and_active_predicates() {
        let id = TaskId::new();
        let s = scheduled(id, "09:00", "10:00");
        let before = from_date_and_hhmm("2025-01-15", "08:30").unwrap();
        let during = from_date_and_hhmm("2025-01-15", "09:30").unwrap();
        let after = from_date_and_hhmm("2025-01-15", "10:30").unwrap();

        assert!(!s.is_currently_active(before));
        assert!(s.is_currently_active(during));
        assert!(!s.is_currently_active(after));

        assert!(!s.is_running_late(before));
        assert!(!s.is_running_late(during));
        assert!(s.is_running_late(after));
    }

    #[test]
    fn task_id_roundtrips_through_string() {
        use std::str::FromStr;
        let id = TaskId::new();
        let s = id.to_string();
        let parsed = TaskId::from_str(&s).unwrap();
        assert_eq!(id, parsed);
    }
}
