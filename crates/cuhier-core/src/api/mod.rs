//! ClickUp API access.
//!
//! The passes only see the [`TaskApi`] trait. [`ClickUpClient`] implements it
//! over HTTP with curl; [`DryRunApi`] wraps any implementation and drops
//! writes.

mod client;
mod dry_run;
mod endpoints;
mod error;

#[cfg(test)]
pub(crate) mod fake;

pub use client::ClickUpClient;
pub use dry_run::DryRunApi;
pub use endpoints::{space_id_from_url, Endpoints};
pub use error::ApiError;

use crate::model::{Folder, Task, TaskList, TaskUpdate};

/// Filters for `GET /list/{id}/task`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskQuery {
    pub include_closed: bool,
    pub subtasks: bool,
}

impl TaskQuery {
    /// Top-level tasks only, closed included.
    pub fn top_level() -> Self {
        Self {
            include_closed: true,
            subtasks: false,
        }
    }

    /// Tasks and subtasks, closed included.
    pub fn all() -> Self {
        Self {
            include_closed: true,
            subtasks: true,
        }
    }

    /// Open tasks and subtasks.
    pub fn open() -> Self {
        Self {
            include_closed: false,
            subtasks: true,
        }
    }
}

/// Operations the hierarchy and status passes need from ClickUp.
pub trait TaskApi {
    fn folders(&self, space_id: &str) -> Result<Vec<Folder>, ApiError>;

    fn lists(&self, folder_id: &str) -> Result<Vec<TaskList>, ApiError>;

    /// All pages of tasks in a list.
    fn tasks(&self, list_id: &str, query: TaskQuery) -> Result<Vec<Task>, ApiError>;

    fn task(&self, task_id: &str) -> Result<Task, ApiError>;

    fn list(&self, list_id: &str) -> Result<TaskList, ApiError>;

    fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<(), ApiError>;

    fn delete_list(&self, list_id: &str) -> Result<(), ApiError>;
}
