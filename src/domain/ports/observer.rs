//! Change-notification port.

use crate::domain::models::Task;

/// Notified synchronously after every store mutation. The UI re-renders;
/// a persistence adapter snapshots to disk.
pub trait ChangeObserver: Send + Sync {
    fn on_change(&self, tasks: &[Task]);
}
