//! Overlap detection, cascade shifting, gap discovery, and the two
//! running/active predicates. This module is pure: it takes a borrowed
//! task slice and a candidate interval and returns a proposed plan or a
//! rejection, never touching the store directly.

use chrono::Duration;

use crate::domain::models::task::{ScheduledTask, Task, TaskId};
use crate::domain::models::ShiftedTask;
use crate::domain::time_math::{Instant, Interval};

/// The three ordered subsets of scheduled tasks a candidate interval
/// intersects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Overlaps {
    pub locked: Vec<TaskId>,
    pub unlocked: Vec<TaskId>,
    pub completed: Vec<TaskId>,
}

impl Overlaps {
    pub fn is_empty(&self) -> bool {
        self.locked.is_empty() && self.unlocked.is_empty() && self.completed.is_empty()
    }
}

/// A positive-length gap between two consecutive scheduled tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub after_task_id: TaskId,
    pub start: Instant,
    pub end: Instant,
    pub duration_minutes: i64,
}

/// Why a cascade could not produce a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeFailure {
    /// A shifted task's new placement would intersect a completed task's
    /// frozen interval. Completed tasks are immovable.
    CompletedTaskBlocked { completed_task: TaskId },
    /// A shifted task could not find a placement that clears every locked
    /// and completed obstacle.
    NoFeasiblePlacement { task_id: TaskId },
}

/// Given a candidate interval and the store, classifies every scheduled
/// task it intersects into locked / unlocked / completed subsets,
/// excluding tasks under edit and the candidate itself (by id, when it is
/// already present in the store, e.g. an `updateTask` call).
pub fn detect_overlaps(candidate: Interval, candidate_id: Option<TaskId>, tasks: &[Task]) -> Overlaps {
    let mut overlaps = Overlaps::default();
    for task in tasks {
        let Some(scheduled) = task.as_scheduled() else {
            continue;
        };
        if Some(scheduled.id) == candidate_id {
            continue;
        }
        if scheduled.editing {
            continue;
        }
        if !candidate.overlaps(&scheduled.interval()) {
            continue;
        }
        if scheduled.is_completed() {
            overlaps.completed.push(scheduled.id);
        } else if scheduled.locked {
            overlaps.locked.push(scheduled.id);
        } else {
            overlaps.unlocked.push(scheduled.id);
        }
    }
    overlaps
}

/// Walks locked and completed intervals forward from `candidate_start`,
/// returning the earliest `s* >= candidate_start` such that
/// `[s*, s* + duration)` intersects none of them.
pub fn earliest_feasible_start(candidate_start: Instant, duration: Duration, tasks: &[Task]) -> Instant {
    let mut blocking: Vec<Interval> = tasks
        .iter()
        .filter_map(Task::as_scheduled)
        .filter(|t| !t.editing && (t.locked || t.is_completed()))
        .map(ScheduledTask::interval)
        .collect();
    blocking.sort_by_key(|interval| interval.start);

    let mut start = candidate_start;
    loop {
        let slot = Interval::new(start, start + duration);
        match blocking.iter().find(|blocker| slot.overlaps(blocker)) {
            Some(blocker) => start = blocker.end,
            None => return start,
        }
    }
}

/// Proposes a cascade of shifts for tasks in the path of `candidate`,
/// walking the store in start order. Tasks under edit are skipped
/// entirely — including from the decision to stop cascading once a task
/// clears the cursor — so a task separated from the point of change only
/// by one or more editing tasks is still pulled forward to stay
/// contiguous; a genuine gap against a non-editing task still halts the
/// cascade. Locked and completed tasks never move; a shift that would
/// land on one either jumps over it (locked) or fails outright
/// (completed).
pub fn cascade_shift(
    candidate_id: Option<TaskId>,
    candidate: Interval,
    tasks: &[Task],
) -> Result<Vec<ShiftedTask>, CascadeFailure> {
    let mut ordered: Vec<&ScheduledTask> = tasks
        .iter()
        .filter_map(Task::as_scheduled)
        .filter(|t| Some(t.id) != candidate_id)
        .collect();
    ordered.sort_by_key(|t| t.start_date_time);

    let blocking: Vec<(TaskId, Interval, bool)> = ordered
        .iter()
        .filter(|t| !t.editing && (t.locked || t.is_completed()))
        .map(|t| (t.id, t.interval(), t.is_completed()))
        .collect();

    let mut plan = Vec::new();
    let mut cursor = candidate.end;
    let mut compaction_offset = Duration::zero();

    for task in ordered {
        if task.editing {
            compaction_offset = compaction_offset + task.duration;
            continue;
        }
        if task.is_completed() || task.locked {
            continue;
        }

        let effective_start = task.start_date_time - compaction_offset;
        if effective_start >= cursor {
            break;
        }

        let mut new_start = cursor;
        let mut new_end = new_start + task.duration;
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            if attempts > blocking.len() + 1 {
                return Err(CascadeFailure::NoFeasiblePlacement { task_id: task.id });
            }
            let slot = Interval::new(new_start, new_end);
            if let Some(hit) = blocking.iter().find(|b| b.2 && slot.overlaps(&b.1)) {
                return Err(CascadeFailure::CompletedTaskBlocked {
                    completed_task: hit.0,
                });
            }
            match blocking.iter().find(|b| !b.2 && slot.overlaps(&b.1)) {
                Some(hit) => {
                    new_start = hit.1.end;
                    new_end = new_start + task.duration;
                }
                None => break,
            }
        }

        cursor = new_end;
        plan.push(ShiftedTask {
            task_id: task.id,
            new_start,
            new_end,
        });
    }

    Ok(plan)
}

/// The ordered list of positive-length gaps between consecutive scheduled
/// tasks, in start order.
pub fn find_schedule_gaps(tasks: &[Task]) -> Vec<Gap> {
    let mut scheduled: Vec<&ScheduledTask> = tasks.iter().filter_map(Task::as_scheduled).collect();
    scheduled.sort_by_key(|t| t.start_date_time);

    scheduled
        .windows(2)
        .filter_map(|pair| {
            let (before, after) = (pair[0], pair[1]);
            if after.start_date_time > before.end_date_time {
                let gap = after.start_date_time - before.end_date_time;
                Some(Gap {
                    after_task_id: before.id,
                    start: before.end_date_time,
                    end: after.start_date_time,
                    duration_minutes: gap.num_minutes(),
                })
            } else {
                None
            }
        })
        .collect()
}

pub fn is_task_running_late(task: &ScheduledTask, now: Instant) -> bool {
    task.is_running_late(now)
}

pub fn is_task_currently_active(task: &ScheduledTask, now: Instant) -> bool {
    task.is_currently_active(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::task::TaskStatus;
    use crate::domain::time_math::from_date_and_hhmm;

    fn at(hhmm: &str) -> Instant {
        from_date_and_hhmm("2025-01-15", hhmm).unwrap()
    }

    fn scheduled(start: &str, end: &str) -> ScheduledTask {
        let start_date_time = at(start);
        let end_date_time = at(end);
        ScheduledTask {
            id: TaskId::new(),
            description: "task".to_string(),
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
    fn scenario_a_cascade_on_insert() {
        let t1 = scheduled("09:00", "10:00");
        let t2 = scheduled("10:00", "11:00");
        let t3 = scheduled("11:00", "12:00");
        let tasks = vec![
            Task::Scheduled(t1.clone()),
            Task::Scheduled(t2.clone()),
            Task::Scheduled(t3.clone()),
        ];
        let candidate = Interval::new(at("09:00"), at("10:30"));
        let plan = cascade_shift(None, candidate, &tasks).unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].task_id, t1.id);
        assert_eq!((plan[0].new_start, plan[0].new_end), (at("10:30"), at("11:30")));
        assert_eq!(plan[1].task_id, t2.id);
        assert_eq!((plan[1].new_start, plan[1].new_end), (at("11:30"), at("12:30")));
        assert_eq!(plan[2].task_id, t3.id);
        assert_eq!((plan[2].new_start, plan[2].new_end), (at("12:30"), at("13:30")));
    }

    #[test]
    fn scenario_c_lock_barrier_computes_earliest_feasible_start() {
        let mut locked = scheduled("10:00", "11:00");
        locked.locked = true;
        let tasks = vec![Task::Scheduled(locked)];
        let s_star = earliest_feasible_start(at("10:30"), Duration::minutes(60), &tasks);
        assert_eq!(s_star, at("11:00"));
    }

    #[test]
    fn scenario_d_editing_task_is_skipped_but_does_not_block_the_cascade() {
        let t1 = scheduled("09:00", "10:00");
        let mut t2 = scheduled("10:00", "11:00");
        t2.editing = true;
        let t3 = scheduled("11:00", "12:00");
        let tasks = vec![
            Task::Scheduled(t1.clone()),
            Task::Scheduled(t2.clone()),
            Task::Scheduled(t3.clone()),
        ];
        let candidate = Interval::new(at("09:00"), at("10:30"));
        let plan = cascade_shift(Some(t1.id), candidate, &tasks).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].task_id, t3.id);
        assert_eq!((plan[0].new_start, plan[0].new_end), (at("10:30"), at("11:30")));
    }

    #[test]
    fn scenario_e_completed_task_blocks_cascade() {
        let mut done = scheduled("10:00", "11:00");
        done.status = TaskStatus::Completed;
        let t = scheduled("11:00", "12:00");
        let tasks = vec![Task::Scheduled(done.clone()), Task::Scheduled(t.clone())];
        let candidate = Interval::new(at("10:30"), at("11:30"));
        let overlaps = detect_overlaps(candidate, None, &tasks);
        assert_eq!(overlaps.completed, vec![done.id]);
        assert!(overlaps.locked.is_empty());
    }

    #[test]
    fn jump_over_locked_task_during_cascade() {
        let t1 = scheduled("09:00", "10:00");
        let mut locked = scheduled("10:30", "11:00");
        locked.locked = true;
        let t3 = scheduled("11:00", "11:30");
        let tasks = vec![
            Task::Scheduled(t1.clone()),
            Task::Scheduled(locked.clone()),
            Task::Scheduled(t3.clone()),
        ];
        let candidate = Interval::new(at("09:00"), at("10:15"));
        let plan = cascade_shift(Some(t1.id), candidate, &tasks).unwrap();

        // t3 would naturally land at 10:15-10:45, which clears the cursor
        // without intersecting the lock at 10:30-11:00, so it is untouched.
        assert!(plan.is_empty());
    }

    #[test]
    fn back_to_back_tasks_do_not_overlap() {
        let a = scheduled("09:00", "10:00");
        let b = scheduled("10:00", "11:00");
        let tasks = vec![Task::Scheduled(a), Task::Scheduled(b.clone())];
        let overlaps = detect_overlaps(Interval::new(at("09:00"), at("10:00")), None, &tasks);
        assert!(!overlaps.unlocked.contains(&b.id));
    }

    #[test]
    fn gap_discovery_finds_positive_length_gaps_only() {
        let t1 = scheduled("09:00", "10:00");
        let t2 = scheduled("11:00", "12:00");
        let t3 = scheduled("12:00", "13:00");
        let tasks = vec![
            Task::Scheduled(t1.clone()),
            Task::Scheduled(t2.clone()),
            Task::Scheduled(t3),
        ];
        let gaps = find_schedule_gaps(&tasks);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].after_task_id, t1.id);
        assert_eq!(gaps[0].duration_minutes, 60);
    }

    #[test]
    fn running_late_and_active_predicates_match_decision_table() {
        let t = scheduled("09:00", "10:00");
        assert!(!is_task_currently_active(&t, at("08:59")));
        assert!(is_task_currently_active(&t, at("09:30")));
        assert!(!is_task_running_late(&t, at("09:30")));
        assert!(is_task_running_late(&t, at("10:01")));
    }
}
