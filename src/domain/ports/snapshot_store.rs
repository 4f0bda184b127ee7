//! Persistence collaborator port.
//!
//! A single local user's day planner has no need for per-record upsert
//! traffic the way a multi-user repository does, so unlike the teacher's
//! per-record `TaskRepository`, this port is whole-snapshot: the caller
//! reloads and re-saves the full task list after every successful
//! mutation. Failure is logged by the caller; this port does not retry.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Task;

/// Loads and persists the full task list. The on-disk schema strips
/// transient UI flags (`editing`, `confirming_delete`, `is_editing_inline`)
/// before serialization.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads all tasks at startup, used to seed the store.
    async fn load_all(&self) -> DomainResult<Vec<Task>>;

    /// Persists the full task list, replacing whatever was there before.
    async fn save_all(&self, tasks: &[Task]) -> DomainResult<()>;
}
