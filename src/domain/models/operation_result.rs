//! The discriminated-union return protocol shared by every mutating
//! [`crate::services::SchedulerOps`] call.
//!
//! A caller that receives [`OperationResult::RequiresConfirmation`] must
//! either obtain user consent and invoke the matching `confirm_*` entry
//! point with the plan payload verbatim, retry with a skip-check flag, or
//! abandon. No state is mutated until a success path or a `confirm_*`
//! call executes.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::models::task::TaskId;
use crate::domain::time_math::Instant;

/// A task shifted by the cascade, as part of a reschedule plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftedTask {
    pub task_id: TaskId,
    pub new_start: Instant,
    pub new_end: Instant,
}

/// The inputs for a scheduled task that has not yet been committed to the
/// store, carried across a confirmation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingScheduledInput {
    pub id: TaskId,
    pub description: String,
    pub start_date_time: Instant,
    pub duration: Duration,
    pub locked: bool,
    /// `Some` when this pending input replaces an existing scheduled task
    /// (an `updateTask` in flight), so the confirm step knows which store
    /// slot to overwrite instead of inserting anew.
    pub replacing_index: Option<usize>,
}

/// Classifies why an operation did not succeed outright, mirroring
/// [`crate::domain::errors::DomainError`]'s taxonomy as data rather than
/// as a string tag a caller would have to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    ConflictPolicy,
    Precondition,
    NoOp,
}

/// A plan requiring user consent before the engine will mutate state.
/// Each arm carries exactly the payload the matching `confirm_*` entry
/// point needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "confirmation_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationRequest {
    /// A candidate start falls strictly inside a currently running task;
    /// offer to complete the running task at the candidate start.
    AdjustRunningTask {
        adjustable_task: TaskId,
        new_end_time: Instant,
        is_extend: bool,
        pending: PendingScheduledInput,
    },
    /// The candidate interval overlaps a completed task; offer to
    /// truncate it to the candidate's start.
    TruncateCompletedTask {
        completed_task_to_truncate: TaskId,
        new_end: Instant,
        pending: PendingScheduledInput,
    },
    /// The candidate intersects one or more locked tasks; the engine
    /// proposes shifting the candidate itself to the earliest feasible
    /// start instead of moving anything else.
    RescheduleNeedsShiftDueToLocked {
        adjusted_task_data_for_resubmission: PendingScheduledInput,
    },
    /// The candidate overlaps unlocked incomplete others; the engine has
    /// computed a cascade plan shifting them out of the way.
    RescheduleOverlapsUnlockedOthers {
        task_object_to_finalize: PendingScheduledInput,
        plan: Vec<ShiftedTask>,
    },
    /// An in-place update (not a fresh insert) produced a cascade plan.
    RescheduleUpdate {
        task_index: usize,
        updated_task_object: PendingScheduledInput,
        plan: Vec<ShiftedTask>,
    },
    /// A task is being completed after its scheduled end; offer to
    /// extend its end to now, cascading subsequent tasks.
    CompleteLate {
        task_index: usize,
        new_end_time: Instant,
        new_duration: Duration,
    },
}

/// The result of a [`crate::services::SchedulerOps`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OperationResult {
    Success {
        message: Option<String>,
        auto_rescheduled_message: Option<String>,
    },
    Failure {
        reason: String,
        kind: FailureKind,
    },
    RequiresConfirmation(ConfirmationRequest),
}

impl OperationResult {
    pub fn success() -> Self {
        Self::Success {
            message: None,
            auto_rescheduled_message: None,
        }
    }

    pub fn success_with_message(message: impl Into<String>) -> Self {
        Self::Success {
            message: Some(message.into()),
            auto_rescheduled_message: None,
        }
    }

    pub fn success_after_reschedule(auto_rescheduled_message: impl Into<String>) -> Self {
        Self::Success {
            message: None,
            auto_rescheduled_message: Some(auto_rescheduled_message.into()),
        }
    }

    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
            kind,
        }
    }

    pub fn requires_confirmation(request: ConfirmationRequest) -> Self {
        Self::RequiresConfirmation(request)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<crate::domain::errors::DomainError> for OperationResult {
    fn from(err: crate::domain::errors::DomainError) -> Self {
        let kind = err.kind();
        Self::failure(kind, err.to_string())
    }
}
