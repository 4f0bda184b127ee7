//! A [`ChangeObserver`] that logs a debug line on every store mutation.

use crate::domain::models::Task;
use crate::domain::ports::ChangeObserver;

pub struct TracingObserver;

impl ChangeObserver for TracingObserver {
    fn on_change(&self, tasks: &[Task]) {
        let scheduled = tasks.iter().filter(|t| t.as_scheduled().is_some()).count();
        let unscheduled = tasks.len() - scheduled;
        tracing::debug!(scheduled, unscheduled, "store changed");
    }
}
