//! Computes the next suggested start time from current store state and
//! the wall clock, used by the UI collaborator to prefill the start-time
//! field.

use crate::domain::time_math::{extract_hhmm, round_up_to_next_5_minutes, Instant};
use crate::store::TaskStore;

pub struct SuggestionService;

impl SuggestionService {
    /// If the store has incomplete scheduled tasks, returns the maximum
    /// `end_date_time` among them as "HH:MM" (the natural "after my last
    /// task" value); otherwise rounds `now` up to the next 5-minute mark.
    pub fn get_suggested_start_time(store: &TaskStore, now: Instant) -> String {
        let latest_end = store
            .get_all()
            .iter()
            .filter_map(|t| t.as_scheduled())
            .filter(|t| !t.is_completed())
            .map(|t| t.end_date_time)
            .max();

        match latest_end {
            Some(end) => extract_hhmm(end),
            None => extract_hhmm(round_up_to_next_5_minutes(now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::task::{ScheduledTask, Task, TaskId, TaskStatus};
    use crate::domain::time_math::from_date_and_hhmm;

    fn scheduled(start: &str, end: &str, status: TaskStatus) -> ScheduledTask {
        let start_date_time = from_date_and_hhmm("2025-01-15", start).unwrap();
        let end_date_time = from_date_and_hhmm("2025-01-15", end).unwrap();
        ScheduledTask {
            id: TaskId::new(),
            description: "task".to_string(),
            start_date_time,
            end_date_time,
            duration: end_date_time - start_date_time,
            status,
            locked: false,
            editing: false,
            confirming_delete: false,
        }
    }

    #[test]
    fn suggests_after_last_incomplete_task_when_present() {
        let mut store = TaskStore::new();
        store.upsert(Task::Scheduled(scheduled("09:00", "10:00", TaskStatus::Incomplete)));
        store.upsert(Task::Scheduled(scheduled("11:00", "12:00", TaskStatus::Incomplete)));

        let now = from_date_and_hhmm("2025-01-15", "08:00").unwrap();
        assert_eq!(SuggestionService::get_suggested_start_time(&store, now), "12:00");
    }

    #[test]
    fn ignores_completed_tasks_when_finding_the_last_end() {
        let mut store = TaskStore::new();
        store.upsert(Task::Scheduled(scheduled("09:00", "10:00", TaskStatus::Incomplete)));
        store.upsert(Task::Scheduled(scheduled("11:00", "12:00", TaskStatus::Completed)));

        let now = from_date_and_hhmm("2025-01-15", "08:00").unwrap();
        assert_eq!(SuggestionService::get_suggested_start_time(&store, now), "10:00");
    }

    #[test]
    fn falls_back_to_rounded_now_when_store_is_empty() {
        let store = TaskStore::new();
        let now = from_date_and_hhmm("2025-01-15", "08:52").unwrap();
        assert_eq!(SuggestionService::get_suggested_start_time(&store, now), "08:55");
    }
}
