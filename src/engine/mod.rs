//! The Scheduling & Rescheduling Engine.
//!
//! Pure functions over `&[Task]` and candidate intervals. Nothing here
//! touches the store directly — [`crate::services::SchedulerOps`] is the
//! only caller, and it is responsible for committing whatever plan this
//! module proposes.

pub mod reschedule;

pub use reschedule::{
    cascade_shift, detect_overlaps, earliest_feasible_start, find_schedule_gaps,
    is_task_currently_active, is_task_running_late, CascadeFailure, Gap, Overlaps,
};
