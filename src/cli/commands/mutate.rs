//! Mutating commands: dispatches a parsed [`Commands`] variant to the
//! matching [`SchedulerOps`] entry point, auto-accepting any confirmation
//! the engine raises when the caller passed `--yes`.

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::domain::models::task::TaskId;
use crate::domain::models::{ConfirmationRequest, OperationResult, ScheduledTaskInput, UnscheduledTaskInput};
use crate::domain::ports::Clock;
use crate::domain::time_math::from_date_and_hhmm;
use crate::services::{AddTaskInput, SchedulerOps, SkipChecks};

use super::parse_priority;

/// Resolves the id-to-index and id-to-task lookups a handler needs,
/// then dispatches. Every handler returns the final [`OperationResult`]
/// after automatically applying at most one confirmation round when
/// `yes` is set.
fn skip_checks(skip_adjust: bool, skip_completed: bool) -> SkipChecks {
    SkipChecks {
        skip_adjust_check: skip_adjust,
        skip_completed_check: skip_completed,
    }
}

fn maybe_confirm<C: Clock>(ops: &mut SchedulerOps<C>, result: OperationResult, yes: bool) -> OperationResult {
    match result {
        OperationResult::RequiresConfirmation(request) if yes => apply_confirmation(ops, request),
        other => other,
    }
}

fn apply_confirmation<C: Clock>(ops: &mut SchedulerOps<C>, request: ConfirmationRequest) -> OperationResult {
    match request {
        ConfirmationRequest::AdjustRunningTask { .. } => ops.confirm_adjust_running_task(request),
        ConfirmationRequest::TruncateCompletedTask { .. } => ops.confirm_truncate_completed_task(request),
        ConfirmationRequest::RescheduleUpdate { .. } => ops.confirm_update_task_and_reschedule(request),
        ConfirmationRequest::CompleteLate { .. } => ops.confirm_complete_late(request),
        // Both addTask and scheduleUnscheduledTask funnel through the same
        // insert-finalization path, so the same confirm call resolves either.
        ConfirmationRequest::RescheduleOverlapsUnlockedOthers { .. } => ops.confirm_add_task_and_reschedule(request),
        ConfirmationRequest::RescheduleNeedsShiftDueToLocked {
            adjusted_task_data_for_resubmission: pending,
        } => {
            let input = ScheduledTaskInput {
                description: pending.description,
                start_date_time: pending.start_date_time,
                duration_minutes: pending.duration.num_minutes(),
                locked: pending.locked,
            };
            match pending.replacing_index {
                Some(index) => ops.update_task(index, input, SkipChecks::none()),
                None => ops.add_task(AddTaskInput::Scheduled(input), SkipChecks::none()),
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<TaskId> {
    TaskId::from_str(raw).with_context(|| format!("'{raw}' is not a valid task id"))
}

fn parse_time(date_anchor: &str, hhmm: &str) -> Result<crate::domain::time_math::Instant> {
    from_date_and_hhmm(date_anchor, hhmm).ok_or_else(|| anyhow!("'{hhmm}' is not a valid HH:MM time"))
}

#[allow(clippy::too_many_arguments)]
pub fn add(
    ops: &mut SchedulerOps<impl Clock>,
    description: String,
    start: Option<String>,
    duration: Option<i64>,
    locked: bool,
    priority: Option<String>,
    est: Option<i64>,
    yes: bool,
    skip_adjust: bool,
    skip_completed: bool,
    today: &str,
) -> Result<OperationResult> {
    let input = match start {
        Some(hhmm) => {
            let start_date_time = parse_time(today, &hhmm)?;
            let duration_minutes = duration.ok_or_else(|| anyhow!("--duration is required with --start"))?;
            AddTaskInput::Scheduled(ScheduledTaskInput {
                description,
                start_date_time,
                duration_minutes,
                locked,
            })
        }
        None => AddTaskInput::Unscheduled(UnscheduledTaskInput {
            description,
            priority: priority.map(|p| parse_priority(&p)).transpose()?,
            est_duration_minutes: est,
        }),
    };
    let result = ops.add_task(input, skip_checks(skip_adjust, skip_completed));
    Ok(maybe_confirm(ops, result, yes))
}

#[allow(clippy::too_many_arguments)]
pub fn update(
    ops: &mut SchedulerOps<impl Clock>,
    index: usize,
    description: String,
    start: String,
    duration: i64,
    locked: bool,
    yes: bool,
    skip_adjust: bool,
    skip_completed: bool,
    today: &str,
) -> Result<OperationResult> {
    let start_date_time = parse_time(today, &start)?;
    let input = ScheduledTaskInput {
        description,
        start_date_time,
        duration_minutes: duration,
        locked,
    };
    let result = ops.update_task(index, input, skip_checks(skip_adjust, skip_completed));
    Ok(maybe_confirm(ops, result, yes))
}

pub fn complete(ops: &mut SchedulerOps<impl Clock>, index: usize, at: Option<String>, yes: bool) -> Result<OperationResult> {
    let result = ops.complete_task(index, at.as_deref());
    Ok(maybe_confirm(ops, result, yes))
}

pub fn lock(ops: &mut SchedulerOps<impl Clock>, id: &str) -> Result<OperationResult> {
    Ok(ops.toggle_lock_state(parse_id(id)?))
}

pub fn edit(ops: &mut SchedulerOps<impl Clock>, id: &str) -> Result<OperationResult> {
    Ok(ops.edit_task(parse_id(id)?))
}

pub fn cancel_edit(ops: &mut SchedulerOps<impl Clock>, id: &str) -> Result<OperationResult> {
    Ok(ops.cancel_edit(parse_id(id)?))
}

pub fn delete(ops: &mut SchedulerOps<impl Clock>, index: usize, yes: bool) -> Result<OperationResult> {
    Ok(ops.delete_task(index, yes))
}

pub fn unschedule(ops: &mut SchedulerOps<impl Clock>, id: &str) -> Result<OperationResult> {
    Ok(ops.unschedule_task(parse_id(id)?))
}

pub fn schedule(
    ops: &mut SchedulerOps<impl Clock>,
    id: &str,
    start: String,
    duration: i64,
    yes: bool,
    skip_adjust: bool,
    skip_completed: bool,
    today: &str,
) -> Result<OperationResult> {
    let start_date_time = parse_time(today, &start)?;
    let result = ops.schedule_unscheduled_task(
        parse_id(id)?,
        start_date_time,
        chrono::Duration::minutes(duration),
        skip_checks(skip_adjust, skip_completed),
    );
    Ok(maybe_confirm(ops, result, yes))
}

pub fn clear_all(ops: &mut SchedulerOps<impl Clock>) -> Result<OperationResult> {
    Ok(ops.delete_all_tasks())
}

pub fn clear_scheduled(ops: &mut SchedulerOps<impl Clock>) -> Result<OperationResult> {
    Ok(ops.delete_all_scheduled_tasks())
}

pub fn clear_completed(ops: &mut SchedulerOps<impl Clock>) -> Result<OperationResult> {
    Ok(ops.delete_completed_tasks())
}
