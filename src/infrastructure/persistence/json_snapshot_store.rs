//! JSON-file implementation of [`SnapshotStore`].

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::errors::DomainResult;
use crate::domain::models::Task;
use crate::domain::ports::SnapshotStore;

/// Persists the full task list as a single JSON array at `path`, writing
/// through a sibling temp file and renaming into place so a crash mid-write
/// never leaves a truncated snapshot on disk.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load_all(&self) -> DomainResult<Vec<Task>> {
        if !self.path.try_exists()? {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path).await?;
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save_all(&self, tasks: &[Task]) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        // Transient UI flags (editing, confirming_delete) belong to the
        // running session, not the stored day plan.
        let mut stripped: Vec<Task> = tasks.to_vec();
        for task in &mut stripped {
            task.set_confirming_delete(false);
            match task {
                Task::Scheduled(t) => t.editing = false,
                Task::Unscheduled(t) => t.is_editing_inline = false,
            }
        }
        let bytes = serde_json::to_vec_pretty(&stripped)?;
        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp = fs::File::create(&tmp_path).await?;
        tmp.write_all(&bytes).await?;
        tmp.flush().await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}
