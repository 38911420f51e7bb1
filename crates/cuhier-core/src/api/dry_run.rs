//! Read-only wrapper: reads go through, writes are logged and skipped.

use super::{ApiError, TaskApi, TaskQuery};
use crate::model::{Folder, Task, TaskList, TaskUpdate};

#[derive(Debug)]
pub struct DryRunApi<A> {
    inner: A,
}

impl<A> DryRunApi<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: TaskApi> TaskApi for DryRunApi<A> {
    fn folders(&self, space_id: &str) -> Result<Vec<Folder>, ApiError> {
        self.inner.folders(space_id)
    }

    fn lists(&self, folder_id: &str) -> Result<Vec<TaskList>, ApiError> {
        self.inner.lists(folder_id)
    }

    fn tasks(&self, list_id: &str, query: TaskQuery) -> Result<Vec<Task>, ApiError> {
        self.inner.tasks(list_id, query)
    }

    fn task(&self, task_id: &str) -> Result<Task, ApiError> {
        self.inner.task(task_id)
    }

    fn list(&self, list_id: &str) -> Result<TaskList, ApiError> {
        self.inner.list(list_id)
    }

    fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<(), ApiError> {
        let body = serde_json::to_string(update).unwrap_or_default();
        tracing::info!(task = task_id, "dry run: would update task with {}", body);
        Ok(())
    }

    fn delete_list(&self, list_id: &str) -> Result<(), ApiError> {
        tracing::info!(list = list_id, "dry run: would delete list");
        Ok(())
    }
}
