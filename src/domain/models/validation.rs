//! Input validation and factory functions for [`super::task::Task`].
//!
//! These are the only legal ways to construct a [`ScheduledTask`] or
//! [`UnscheduledTask`]; callers outside this module build tasks through
//! them so the duration/endDateTime invariant can never be bypassed.

use chrono::Duration;

use crate::domain::errors::DomainError;
use crate::domain::models::task::{Priority, ScheduledTask, TaskId, TaskStatus, UnscheduledTask};
use crate::domain::time_math::Instant;

/// Raw, pre-validated shape for a scheduled task, as supplied by a caller
/// before `id`/`end_date_time` are derived.
#[derive(Debug, Clone)]
pub struct ScheduledTaskInput {
    pub description: String,
    pub start_date_time: Instant,
    pub duration_minutes: i64,
    pub locked: bool,
}

/// Raw, pre-validated shape for an unscheduled task.
#[derive(Debug, Clone)]
pub struct UnscheduledTaskInput {
    pub description: String,
    pub priority: Option<Priority>,
    /// `None` or `Some(0)` both mean "no estimate".
    pub est_duration_minutes: Option<i64>,
}

fn validate_description(description: &str) -> Result<String, DomainError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validates a scheduled-task input, returning the trimmed description and
/// a positive [`Duration`]. Rejects non-positive or fractional durations.
pub fn validate_scheduled_inputs(
    input: &ScheduledTaskInput,
) -> Result<(String, Duration), DomainError> {
    let description = validate_description(&input.description)?;
    if input.duration_minutes <= 0 {
        return Err(DomainError::Validation(
            "duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok((description, Duration::minutes(input.duration_minutes)))
}

/// Validates an unscheduled-task input, returning the trimmed description,
/// the resolved priority (default [`Priority::Medium`]), and the estimate
/// (zero collapses to `None`, matching spec's "zero estDuration is
/// permitted and stored as null").
pub fn validate_unscheduled_inputs(
    input: &UnscheduledTaskInput,
) -> Result<(String, Priority, Option<Duration>), DomainError> {
    let description = validate_description(&input.description)?;
    if let Some(minutes) = input.est_duration_minutes {
        if minutes < 0 {
            return Err(DomainError::Validation(
                "estimated duration must not be negative".to_string(),
            ));
        }
    }
    let priority = input.priority.unwrap_or_default();
    let est_duration = match input.est_duration_minutes {
        Some(0) | None => None,
        Some(minutes) => Some(Duration::minutes(minutes)),
    };
    Ok((description, priority, est_duration))
}

/// Validates the input and constructs a fresh [`ScheduledTask`], assigning
/// a new [`TaskId`] and computing `end_date_time`.
pub fn make_scheduled_task(input: &ScheduledTaskInput) -> Result<ScheduledTask, DomainError> {
    let (description, duration) = validate_scheduled_inputs(input)?;
    let end_date_time = input.start_date_time + duration;
    Ok(ScheduledTask {
        id: TaskId::new(),
        description,
        start_date_time: input.start_date_time,
        end_date_time,
        duration,
        status: TaskStatus::Incomplete,
        locked: input.locked,
        editing: false,
        confirming_delete: false,
    })
}

/// Validates the input and constructs a fresh [`UnscheduledTask`],
/// assigning a new [`TaskId`].
pub fn make_unscheduled_task(input: &UnscheduledTaskInput) -> Result<UnscheduledTask, DomainError> {
    let (description, priority, est_duration) = validate_unscheduled_inputs(input)?;
    Ok(UnscheduledTask {
        id: TaskId::new(),
        description,
        priority,
        est_duration,
        status: TaskStatus::Incomplete,
        is_editing_inline: false,
        confirming_delete: false,
    })
}
