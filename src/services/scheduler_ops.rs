//! `SchedulerOps`: the public operations that compose the reschedule
//! engine with the store and emit [`OperationResult`]s.
//!
//! Every entry point takes raw, pre-validated input and returns a result
//! by value; state is mutated only on a direct success path or inside a
//! `confirm_*` call. Every `confirm_*` entry point re-derives its plan
//! from the current store before committing, so a stale or invalidated
//! plan surfaces as `FailureKind::Precondition` rather than silently
//! applying drifted state.

use chrono::Duration;

use crate::domain::errors::DomainError;
use crate::domain::models::task::{ScheduledTask, Task, TaskId, TaskStatus, UnscheduledTask};
use crate::domain::models::{
    make_scheduled_task, make_unscheduled_task, validate_scheduled_inputs, ConfirmationRequest,
    FailureKind, OperationResult, PendingScheduledInput, ScheduledTaskInput, ShiftedTask,
    UnscheduledTaskInput,
};
use crate::domain::ports::Clock;
use crate::domain::time_math::{from_date_and_hhmm, Instant, Interval};
use crate::engine::reschedule::{cascade_shift, detect_overlaps, earliest_feasible_start, CascadeFailure};
use crate::store::TaskStore;

/// Escape flags a caller may set to bypass a specific confirmation check,
/// e.g. after the user has already been warned once in the same session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipChecks {
    pub skip_adjust_check: bool,
    pub skip_completed_check: bool,
}

impl SkipChecks {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Input to [`SchedulerOps::add_task`]: either shape, pre-validation.
pub enum AddTaskInput {
    Scheduled(ScheduledTaskInput),
    Unscheduled(UnscheduledTaskInput),
}

enum CandidateAnalysis {
    /// No overlap of any kind; safe to insert/update directly.
    Clean,
    AdjustRunning {
        task_id: TaskId,
        new_end_time: Instant,
        is_extend: bool,
    },
    TruncateCompleted {
        task_id: TaskId,
        new_end: Instant,
    },
    NeedsLockShift {
        s_star: Instant,
    },
    NeedsCascade(Vec<ShiftedTask>),
    Blocked(DomainError),
}

pub struct SchedulerOps<C: Clock> {
    store: TaskStore,
    clock: C,
}

impl<C: Clock> SchedulerOps<C> {
    pub fn new(store: TaskStore, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    fn now(&self) -> Instant {
        self.clock.now()
    }

    fn cascade_failure_to_error(failure: CascadeFailure) -> DomainError {
        match failure {
            CascadeFailure::CompletedTaskBlocked { completed_task } => DomainError::ConflictPolicy(
                format!("cascade blocked: task {completed_task} is completed and cannot move"),
            ),
            CascadeFailure::NoFeasiblePlacement { task_id } => {
                DomainError::ConflictPolicy(format!("no feasible placement found for task {task_id}"))
            }
        }
    }

    /// Runs the addTask/scheduleUnscheduledTask conflict analysis against
    /// the current store, `candidate_id` excluded from detection (it may
    /// already be present, for an in-place update).
    fn analyze_scheduled_candidate(
        &self,
        candidate_id: Option<TaskId>,
        start: Instant,
        duration: Duration,
        skip: SkipChecks,
    ) -> CandidateAnalysis {
        let candidate_interval = Interval::new(start, start + duration);
        let now = self.now();

        if !skip.skip_adjust_check {
            let running = self
                .store
                .get_all()
                .iter()
                .filter_map(Task::as_scheduled)
                .filter(|t| Some(t.id) != candidate_id && !t.is_completed() && !t.locked && !t.editing)
                .find(|t| t.is_currently_active(now) && t.start_date_time < start && start < t.end_date_time);
            if let Some(running) = running {
                return CandidateAnalysis::AdjustRunning {
                    task_id: running.id,
                    new_end_time: start,
                    is_extend: start > running.end_date_time,
                };
            }
        }

        if !skip.skip_completed_check {
            let completed = self
                .store
                .get_all()
                .iter()
                .filter_map(Task::as_scheduled)
                .filter(|t| Some(t.id) != candidate_id && t.is_completed() && !t.editing)
                .find(|t| candidate_interval.overlaps(&t.interval()));
            if let Some(completed) = completed {
                return CandidateAnalysis::TruncateCompleted {
                    task_id: completed.id,
                    new_end: start,
                };
            }
        }

        let overlaps = detect_overlaps(candidate_interval, candidate_id, self.store.get_all());
        if !overlaps.locked.is_empty() {
            let s_star = earliest_feasible_start(start, duration, self.store.get_all());
            return CandidateAnalysis::NeedsLockShift { s_star };
        }

        if !overlaps.unlocked.is_empty() {
            return match cascade_shift(candidate_id, candidate_interval, self.store.get_all()) {
                Ok(plan) => CandidateAnalysis::NeedsCascade(plan),
                Err(failure) => CandidateAnalysis::Blocked(Self::cascade_failure_to_error(failure)),
            };
        }

        CandidateAnalysis::Clean
    }

    fn pending_from(task: &ScheduledTask, replacing_index: Option<usize>) -> PendingScheduledInput {
        PendingScheduledInput {
            id: task.id,
            description: task.description.clone(),
            start_date_time: task.start_date_time,
            duration: task.duration,
            locked: task.locked,
            replacing_index,
        }
    }

    fn analysis_to_result(
        &self,
        task: &ScheduledTask,
        analysis: CandidateAnalysis,
        replacing_index: Option<usize>,
        update_confirmation: bool,
    ) -> Result<Vec<ShiftedTask>, OperationResult> {
        match analysis {
            CandidateAnalysis::Clean => Ok(Vec::new()),
            CandidateAnalysis::NeedsCascade(plan) => {
                let pending = Self::pending_from(task, replacing_index);
                let request = if update_confirmation {
                    ConfirmationRequest::RescheduleUpdate {
                        task_index: replacing_index.expect("update confirmation requires an index"),
                        updated_task_object: pending,
                        plan,
                    }
                } else {
                    ConfirmationRequest::RescheduleOverlapsUnlockedOthers {
                        task_object_to_finalize: pending,
                        plan,
                    }
                };
                Err(OperationResult::requires_confirmation(request))
            }
            CandidateAnalysis::NeedsLockShift { s_star } => {
                let mut pending = Self::pending_from(task, replacing_index);
                pending.start_date_time = s_star;
                Err(OperationResult::requires_confirmation(
                    ConfirmationRequest::RescheduleNeedsShiftDueToLocked {
                        adjusted_task_data_for_resubmission: pending,
                    },
                ))
            }
            CandidateAnalysis::AdjustRunning {
                task_id,
                new_end_time,
                is_extend,
            } => {
                let pending = Self::pending_from(task, replacing_index);
                Err(OperationResult::requires_confirmation(
                    ConfirmationRequest::AdjustRunningTask {
                        adjustable_task: task_id,
                        new_end_time,
                        is_extend,
                        pending,
                    },
                ))
            }
            CandidateAnalysis::TruncateCompleted { task_id, new_end } => {
                let pending = Self::pending_from(task, replacing_index);
                Err(OperationResult::requires_confirmation(
                    ConfirmationRequest::TruncateCompletedTask {
                        completed_task_to_truncate: task_id,
                        new_end,
                        pending,
                    },
                ))
            }
            CandidateAnalysis::Blocked(err) => Err(err.into()),
        }
    }

    fn commit_new_scheduled(&mut self, task: ScheduledTask, plan: Vec<ShiftedTask>) -> OperationResult {
        self.store.upsert(Task::Scheduled(task));
        self.apply_plan(plan)
    }

    fn apply_plan(&mut self, plan: Vec<ShiftedTask>) -> OperationResult {
        if plan.is_empty() {
            return OperationResult::success();
        }
        for shift in &plan {
            if let Some(task) = self.store.get_by_id(shift.task_id).cloned() {
                if let Task::Scheduled(mut scheduled) = task {
                    scheduled.start_date_time = shift.new_start;
                    scheduled.end_date_time = shift.new_end;
                    self.store.upsert(Task::Scheduled(scheduled));
                }
            }
        }
        OperationResult::success_after_reschedule(format!("{} task(s) rescheduled", plan.len()))
    }

    // ---- addTask ----------------------------------------------------

    pub fn add_task(&mut self, input: AddTaskInput, skip: SkipChecks) -> OperationResult {
        match input {
            AddTaskInput::Unscheduled(raw) => match make_unscheduled_task(&raw) {
                Ok(task) => {
                    self.store.upsert(Task::Unscheduled(task));
                    OperationResult::success()
                }
                Err(err) => err.into(),
            },
            AddTaskInput::Scheduled(raw) => {
                let task = match make_scheduled_task(&raw) {
                    Ok(task) => task,
                    Err(err) => return err.into(),
                };
                let analysis =
                    self.analyze_scheduled_candidate(None, task.start_date_time, task.duration, skip);
                match self.analysis_to_result(&task, analysis, None, false) {
                    Ok(plan) => self.commit_new_scheduled(task, plan),
                    Err(result) => result,
                }
            }
        }
    }

    /// Applies the precomputed shift plan and inserts the new task
    /// atomically. Recomputes the cascade fresh against the current store
    /// rather than trusting the caller-supplied plan verbatim, so a store
    /// mutated between the original call and this confirmation surfaces
    /// as a precondition failure instead of corrupting state.
    pub fn confirm_add_task_and_reschedule(&mut self, request: ConfirmationRequest) -> OperationResult {
        let ConfirmationRequest::RescheduleOverlapsUnlockedOthers {
            task_object_to_finalize,
            ..
        } = request
        else {
            return OperationResult::failure(
                FailureKind::Precondition,
                "confirm_add_task_and_reschedule called with the wrong confirmation payload",
            );
        };
        self.finalize_pending_insert(task_object_to_finalize)
    }

    pub fn confirm_schedule_unscheduled_task(&mut self, request: ConfirmationRequest) -> OperationResult {
        let ConfirmationRequest::RescheduleOverlapsUnlockedOthers {
            task_object_to_finalize,
            ..
        } = request
        else {
            return OperationResult::failure(
                FailureKind::Precondition,
                "confirm_schedule_unscheduled_task called with the wrong confirmation payload",
            );
        };
        self.finalize_pending_insert(task_object_to_finalize)
    }

    fn finalize_pending_insert(&mut self, pending: PendingScheduledInput) -> OperationResult {
        let interval = Interval::new(pending.start_date_time, pending.start_date_time + pending.duration);
        match cascade_shift(Some(pending.id), interval, self.store.get_all()) {
            Ok(plan) => {
                let task = ScheduledTask {
                    id: pending.id,
                    description: pending.description,
                    start_date_time: pending.start_date_time,
                    end_date_time: pending.start_date_time + pending.duration,
                    duration: pending.duration,
                    status: TaskStatus::Incomplete,
                    locked: pending.locked,
                    editing: false,
                    confirming_delete: false,
                };
                self.commit_new_scheduled(task, plan)
            }
            Err(failure) => Self::cascade_failure_to_error(failure).into(),
        }
    }

    pub fn confirm_adjust_running_task(&mut self, request: ConfirmationRequest) -> OperationResult {
        let ConfirmationRequest::AdjustRunningTask {
            adjustable_task,
            new_end_time,
            pending,
            ..
        } = request
        else {
            return OperationResult::failure(
                FailureKind::Precondition,
                "confirm_adjust_running_task called with the wrong confirmation payload",
            );
        };

        let Some(running) = self.store.get_by_id(adjustable_task).cloned() else {
            return OperationResult::failure(FailureKind::Precondition, "the running task no longer exists");
        };
        let Task::Scheduled(mut running) = running else {
            return OperationResult::failure(FailureKind::Precondition, "the running task is no longer scheduled");
        };
        if running.is_completed() || running.locked {
            return OperationResult::failure(
                FailureKind::Precondition,
                "the running task is no longer eligible to be adjusted",
            );
        }

        running.end_date_time = new_end_time;
        running.duration = new_end_time - running.start_date_time;
        running.status = TaskStatus::Completed;
        self.store.upsert(Task::Scheduled(running));

        self.finalize_with_remaining_unlocked_check(pending)
    }

    pub fn confirm_truncate_completed_task(&mut self, request: ConfirmationRequest) -> OperationResult {
        let ConfirmationRequest::TruncateCompletedTask {
            completed_task_to_truncate,
            new_end,
            pending,
        } = request
        else {
            return OperationResult::failure(
                FailureKind::Precondition,
                "confirm_truncate_completed_task called with the wrong confirmation payload",
            );
        };

        let Some(completed) = self.store.get_by_id(completed_task_to_truncate).cloned() else {
            return OperationResult::failure(FailureKind::Precondition, "the completed task no longer exists");
        };
        let Task::Scheduled(mut completed) = completed else {
            return OperationResult::failure(FailureKind::Precondition, "the referenced task is no longer scheduled");
        };
        if !completed.is_completed() {
            return OperationResult::failure(FailureKind::Precondition, "the referenced task is no longer completed");
        }

        completed.end_date_time = new_end;
        completed.duration = new_end - completed.start_date_time;
        self.store.upsert(Task::Scheduled(completed));

        self.finalize_with_remaining_unlocked_check(pending)
    }

    /// After resolving an adjust/truncate confirmation, re-runs the
    /// unlocked-overlap cascade once more (ignoring the adjust/completed
    /// checks, already handled) before committing the pending insert.
    fn finalize_with_remaining_unlocked_check(&mut self, pending: PendingScheduledInput) -> OperationResult {
        let interval = Interval::new(pending.start_date_time, pending.start_date_time + pending.duration);
        let overlaps = detect_overlaps(interval, Some(pending.id), self.store.get_all());
        if !overlaps.locked.is_empty() {
            return OperationResult::failure(
                FailureKind::ConflictPolicy,
                "a locked task now blocks this placement; resubmit with an adjusted start time",
            );
        }
        self.finalize_pending_insert(pending)
    }

    // ---- updateTask ---------------------------------------------------

    pub fn update_task(&mut self, index: usize, new_inputs: ScheduledTaskInput, skip: SkipChecks) -> OperationResult {
        let Some(Task::Scheduled(existing)) = self.store.get_by_index(index).cloned() else {
            return OperationResult::failure(FailureKind::Precondition, "no scheduled task at that index");
        };

        let (description, duration) = match validate_scheduled_inputs(&new_inputs) {
            Ok(v) => v,
            Err(err) => return err.into(),
        };

        let candidate = ScheduledTask {
            id: existing.id,
            description,
            start_date_time: new_inputs.start_date_time,
            end_date_time: new_inputs.start_date_time + duration,
            duration,
            status: existing.status,
            locked: new_inputs.locked,
            editing: existing.editing,
            confirming_delete: existing.confirming_delete,
        };

        let analysis = self.analyze_scheduled_candidate(Some(existing.id), candidate.start_date_time, duration, skip);
        match self.analysis_to_result(&candidate, analysis, Some(index), true) {
            Ok(plan) => {
                self.store.upsert(Task::Scheduled(candidate));
                self.apply_plan(plan)
            }
            Err(result) => result,
        }
    }

    pub fn confirm_update_task_and_reschedule(&mut self, request: ConfirmationRequest) -> OperationResult {
        let ConfirmationRequest::RescheduleUpdate {
            updated_task_object, ..
        } = request
        else {
            return OperationResult::failure(
                FailureKind::Precondition,
                "confirm_update_task_and_reschedule called with the wrong confirmation payload",
            );
        };

        if self.store.get_by_id(updated_task_object.id).is_none() {
            return OperationResult::failure(FailureKind::Precondition, "the task being updated no longer exists");
        }

        let interval = Interval::new(
            updated_task_object.start_date_time,
            updated_task_object.start_date_time + updated_task_object.duration,
        );
        match cascade_shift(Some(updated_task_object.id), interval, self.store.get_all()) {
            Ok(plan) => {
                let Some(Task::Scheduled(mut task)) = self.store.get_by_id(updated_task_object.id).cloned() else {
                    return OperationResult::failure(FailureKind::Precondition, "the task being updated is no longer scheduled");
                };
                task.description = updated_task_object.description;
                task.start_date_time = updated_task_object.start_date_time;
                task.end_date_time = interval.end;
                task.duration = updated_task_object.duration;
                task.locked = updated_task_object.locked;
                self.store.upsert(Task::Scheduled(task));
                self.apply_plan(plan)
            }
            Err(failure) => Self::cascade_failure_to_error(failure).into(),
        }
    }

    // ---- completeTask --------------------------------------------------

    pub fn complete_task(&mut self, index: usize, current_time_24: Option<&str>) -> OperationResult {
        let Some(task) = self.store.get_by_index(index).cloned() else {
            return OperationResult::failure(FailureKind::Precondition, "no task at that index");
        };

        if task.is_completed() {
            return OperationResult::success();
        }

        if let (Some(time_str), Task::Scheduled(scheduled)) = (current_time_24, &task) {
            let date = crate::domain::time_math::extract_date(scheduled.start_date_time);
            let Some(now) = from_date_and_hhmm(&date, time_str) else {
                return OperationResult::failure(FailureKind::Validation, "invalid current time");
            };
            if now > scheduled.end_date_time {
                let new_duration = now - scheduled.start_date_time;
                return OperationResult::requires_confirmation(ConfirmationRequest::CompleteLate {
                    task_index: index,
                    new_end_time: now,
                    new_duration,
                });
            }
        }

        let mut task = task;
        match &mut task {
            Task::Scheduled(s) => s.status = TaskStatus::Completed,
            Task::Unscheduled(u) => u.status = TaskStatus::Completed,
        }
        self.store.upsert(task);
        OperationResult::success()
    }

    pub fn confirm_complete_late(&mut self, request: ConfirmationRequest) -> OperationResult {
        let ConfirmationRequest::CompleteLate {
            task_index,
            new_end_time,
            new_duration,
        } = request
        else {
            return OperationResult::failure(
                FailureKind::Precondition,
                "confirm_complete_late called with the wrong confirmation payload",
            );
        };

        let Some(Task::Scheduled(mut task)) = self.store.get_by_index(task_index).cloned() else {
            return OperationResult::failure(FailureKind::Precondition, "no scheduled task at that index");
        };
        if task.is_completed() {
            return OperationResult::failure(FailureKind::Precondition, "the task was already completed");
        }

        task.end_date_time = new_end_time;
        task.duration = new_duration;
        task.status = TaskStatus::Completed;
        let new_interval = task.interval();
        self.store.upsert(Task::Scheduled(task));

        // No candidate_id exclusion here: the task is already committed at
        // its final, frozen interval and must act as a completed obstacle
        // for the cascade walk, not be filtered out of it.
        match cascade_shift(None, new_interval, self.store.get_all()) {
            Ok(plan) => self.apply_plan(plan),
            Err(failure) => Self::cascade_failure_to_error(failure).into(),
        }
    }

    // ---- lock / edit ----------------------------------------------------

    pub fn toggle_lock_state(&mut self, id: TaskId) -> OperationResult {
        let Some(Task::Scheduled(mut task)) = self.store.get_by_id(id).cloned() else {
            return OperationResult::failure(FailureKind::Precondition, "no scheduled task with that id");
        };
        task.locked = !task.locked;
        self.store.upsert(Task::Scheduled(task));
        OperationResult::success()
    }

    pub fn edit_task(&mut self, id: TaskId) -> OperationResult {
        if self.store.get_by_id(id).is_none() {
            return OperationResult::failure(FailureKind::Precondition, "no task with that id");
        }
        self.store.set_editing(id, true);
        OperationResult::success()
    }

    pub fn cancel_edit(&mut self, id: TaskId) -> OperationResult {
        if self.store.get_by_id(id).is_none() {
            return OperationResult::failure(FailureKind::Precondition, "no task with that id");
        }
        self.store.set_editing(id, false);
        OperationResult::success()
    }

    // ---- delete ----------------------------------------------------------

    pub fn delete_task(&mut self, index: usize, confirmed: bool) -> OperationResult {
        let Some(task) = self.store.get_by_index(index).cloned() else {
            return OperationResult::failure(FailureKind::Precondition, "no task at that index");
        };
        let id = task.id();
        if confirmed {
            self.store.remove(id);
            OperationResult::success_with_message("task deleted")
        } else {
            self.store.set_confirming_delete(id, true);
            OperationResult::success_with_message("click delete again to confirm")
        }
    }

    pub fn unschedule_task(&mut self, id: TaskId) -> OperationResult {
        let Some(Task::Scheduled(task)) = self.store.get_by_id(id).cloned() else {
            return OperationResult::failure(FailureKind::Precondition, "no scheduled task with that id");
        };
        let converted = UnscheduledTask {
            id: task.id,
            description: task.description,
            priority: Default::default(),
            est_duration: None,
            status: task.status,
            is_editing_inline: false,
            confirming_delete: false,
        };
        self.store.upsert(Task::Unscheduled(converted));
        OperationResult::success()
    }

    pub fn schedule_unscheduled_task(
        &mut self,
        id: TaskId,
        start_time: Instant,
        duration: Duration,
        skip: SkipChecks,
    ) -> OperationResult {
        let Some(Task::Unscheduled(existing)) = self.store.get_by_id(id).cloned() else {
            return OperationResult::failure(FailureKind::Precondition, "no unscheduled task with that id");
        };

        let candidate = ScheduledTask {
            id: existing.id,
            description: existing.description,
            start_date_time: start_time,
            end_date_time: start_time + duration,
            duration,
            status: existing.status,
            locked: false,
            editing: false,
            confirming_delete: false,
        };

        let analysis = self.analyze_scheduled_candidate(Some(id), start_time, duration, skip);
        match self.analysis_to_result(&candidate, analysis, None, false) {
            Ok(plan) => self.commit_new_scheduled(candidate, plan),
            Err(result) => result,
        }
    }

    // ---- bulk deletes -----------------------------------------------------

    pub fn delete_all_tasks(&mut self) -> OperationResult {
        if self.store.get_all().is_empty() {
            return OperationResult::failure(FailureKind::NoOp, "there are no tasks to delete");
        }
        self.store.replace_all(Vec::new());
        OperationResult::success_with_message("all tasks deleted")
    }

    pub fn delete_all_scheduled_tasks(&mut self) -> OperationResult {
        let remaining: Vec<Task> = self
            .store
            .get_all()
            .iter()
            .filter(|t| t.as_scheduled().is_none())
            .cloned()
            .collect();
        if remaining.len() == self.store.get_all().len() {
            return OperationResult::failure(FailureKind::NoOp, "there are no scheduled tasks to delete");
        }
        self.store.replace_all(remaining);
        OperationResult::success_with_message("all scheduled tasks deleted")
    }

    pub fn delete_completed_tasks(&mut self) -> OperationResult {
        let remaining: Vec<Task> = self
            .store
            .get_all()
            .iter()
            .filter(|t| !t.is_completed())
            .cloned()
            .collect();
        if remaining.len() == self.store.get_all().len() {
            return OperationResult::failure(FailureKind::NoOp, "there are no completed tasks to delete");
        }
        self.store.replace_all(remaining);
        OperationResult::success_with_message("completed tasks deleted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixedClock;
    use crate::domain::time_math::from_date_and_hhmm;

    fn at(hhmm: &str) -> Instant {
        from_date_and_hhmm("2025-01-15", hhmm).unwrap()
    }

    fn ops_with_clock(now: &str) -> SchedulerOps<FixedClock> {
        SchedulerOps::new(TaskStore::new(), FixedClock(at(now)))
    }

    fn insert_clean(ops: &mut SchedulerOps<FixedClock>, start: &str, end: &str) -> TaskId {
        let duration = at(end) - at(start);
        let result = ops.add_task(
            AddTaskInput::Scheduled(ScheduledTaskInput {
                description: "task".to_string(),
                start_date_time: at(start),
                duration_minutes: duration.num_minutes(),
                locked: false,
            }),
            SkipChecks::none(),
        );
        assert!(result.is_success(), "expected clean insert, got {result:?}");
        ops.store()
            .get_all()
            .iter()
            .find(|t| t.as_scheduled().map(|s| s.start_date_time) == Some(at(start)))
            .unwrap()
            .id()
    }

    #[test]
    fn scenario_a_add_task_requires_confirmation_then_cascades() {
        let mut ops = ops_with_clock("08:00");
        insert_clean(&mut ops, "09:00", "10:00");
        insert_clean(&mut ops, "10:00", "11:00");
        insert_clean(&mut ops, "11:00", "12:00");

        let result = ops.add_task(
            AddTaskInput::Scheduled(ScheduledTaskInput {
                description: "New".to_string(),
                start_date_time: at("09:00"),
                duration_minutes: 90,
                locked: false,
            }),
            SkipChecks::none(),
        );

        let OperationResult::RequiresConfirmation(request) = result else {
            panic!("expected a confirmation request, got {result:?}");
        };
        let ConfirmationRequest::RescheduleOverlapsUnlockedOthers { plan, .. } = &request else {
            panic!("expected RescheduleOverlapsUnlockedOthers, got {request:?}");
        };
        assert_eq!(plan.len(), 3);

        let confirmed = ops.confirm_add_task_and_reschedule(request);
        assert!(confirmed.is_success());
        assert_eq!(ops.store().get_all().len(), 4);
    }

    #[test]
    fn scenario_c_lock_barrier_returns_adjusted_start_for_resubmission() {
        let mut ops = ops_with_clock("08:00");
        let lock_result = ops.add_task(
            AddTaskInput::Scheduled(ScheduledTaskInput {
                description: "locked".to_string(),
                start_date_time: at("10:00"),
                duration_minutes: 60,
                locked: true,
            }),
            SkipChecks::none(),
        );
        assert!(lock_result.is_success());

        let result = ops.add_task(
            AddTaskInput::Scheduled(ScheduledTaskInput {
                description: "New".to_string(),
                start_date_time: at("10:30"),
                duration_minutes: 60,
                locked: false,
            }),
            SkipChecks::none(),
        );

        let OperationResult::RequiresConfirmation(ConfirmationRequest::RescheduleNeedsShiftDueToLocked {
            adjusted_task_data_for_resubmission,
        }) = result
        else {
            panic!("expected RescheduleNeedsShiftDueToLocked, got {result:?}");
        };
        assert_eq!(adjusted_task_data_for_resubmission.start_date_time, at("11:00"));
    }

    #[test]
    fn deleting_an_empty_backlog_is_a_no_op() {
        let mut ops = ops_with_clock("08:00");
        let result = ops.delete_all_tasks();
        assert!(matches!(
            result,
            OperationResult::Failure {
                kind: FailureKind::NoOp,
                ..
            }
        ));
    }

    #[test]
    fn two_consecutive_lock_toggles_are_the_identity() {
        let mut ops = ops_with_clock("08:00");
        let id = insert_clean(&mut ops, "09:00", "10:00");
        ops.toggle_lock_state(id);
        ops.toggle_lock_state(id);
        assert!(!ops.store().get_by_id(id).unwrap().as_scheduled().unwrap().locked);
    }

    #[test]
    fn unschedule_then_reschedule_preserves_identity_and_interval() {
        let mut ops = ops_with_clock("08:00");
        let id = insert_clean(&mut ops, "09:00", "10:00");
        ops.unschedule_task(id);
        assert!(ops.store().get_by_id(id).unwrap().as_unscheduled().is_some());

        let result = ops.schedule_unscheduled_task(id, at("09:00"), Duration::minutes(60), SkipChecks::none());
        assert!(result.is_success());
        let restored = ops.store().get_by_id(id).unwrap().as_scheduled().unwrap();
        assert_eq!(restored.start_date_time, at("09:00"));
        assert_eq!(restored.end_date_time, at("10:00"));
    }

    #[test]
    fn editing_then_cancelling_leaves_the_interval_untouched() {
        let mut ops = ops_with_clock("08:00");
        let id = insert_clean(&mut ops, "09:00", "10:00");
        ops.edit_task(id);
        ops.cancel_edit(id);
        let task = ops.store().get_by_id(id).unwrap().as_scheduled().unwrap();
        assert!(!task.editing);
        assert_eq!(task.start_date_time, at("09:00"));
    }

    #[test]
    fn skip_none_applies_defaults() {
        assert!(!SkipChecks::none().skip_adjust_check);
        assert!(!SkipChecks::none().skip_completed_check);
    }
}
