//! Renders an [`OperationResult`] to a human-readable line.

use console::style;

use crate::domain::models::{ConfirmationRequest, OperationResult};
use crate::domain::time_math::extract_hhmm;

pub fn render_operation_result(result: &OperationResult) -> String {
    match result {
        OperationResult::Success {
            message,
            auto_rescheduled_message,
        } => {
            let mut lines = vec![format!("{}", style("ok").green().bold())];
            if let Some(message) = message {
                lines.push(message.clone());
            }
            if let Some(message) = auto_rescheduled_message {
                lines.push(message.clone());
            }
            lines.join(" ")
        }
        OperationResult::Failure { reason, kind } => {
            format!("{} [{:?}] {reason}", style("failed").red().bold(), kind)
        }
        OperationResult::RequiresConfirmation(request) => render_confirmation_request(request),
    }
}

fn render_confirmation_request(request: &ConfirmationRequest) -> String {
    let header = style("confirmation required").yellow().bold();
    match request {
        ConfirmationRequest::AdjustRunningTask {
            new_end_time,
            is_extend,
            ..
        } => format!(
            "{header}: a task is currently running; {} it to end at {} and proceed? re-run with --yes to accept.",
            if *is_extend { "extend" } else { "shorten" },
            extract_hhmm(*new_end_time)
        ),
        ConfirmationRequest::TruncateCompletedTask { new_end, .. } => format!(
            "{header}: this overlaps a completed task; truncate it to end at {}? re-run with --yes to accept.",
            extract_hhmm(*new_end)
        ),
        ConfirmationRequest::RescheduleNeedsShiftDueToLocked {
            adjusted_task_data_for_resubmission,
        } => format!(
            "{header}: a locked task is in the way; the earliest feasible start is {}. re-run with --yes to resubmit at that time.",
            extract_hhmm(adjusted_task_data_for_resubmission.start_date_time)
        ),
        ConfirmationRequest::RescheduleOverlapsUnlockedOthers { plan, .. } => format!(
            "{header}: this overlaps {} other task(s); they will be shifted later. re-run with --yes to accept.",
            plan.len()
        ),
        ConfirmationRequest::RescheduleUpdate { plan, .. } => format!(
            "{header}: this update overlaps {} other task(s); they will be shifted later. re-run with --yes to accept.",
            plan.len()
        ),
        ConfirmationRequest::CompleteLate { new_end_time, .. } => format!(
            "{header}: this task is running late; complete it at {} and cascade later tasks? re-run with --yes to accept.",
            extract_hhmm(*new_end_time)
        ),
    }
}
