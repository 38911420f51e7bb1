//! In-memory `TaskApi` for unit tests of the passes.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::{ApiError, TaskApi, TaskQuery};
use crate::model::{
    CustomField, Folder, FolderRef, ListRef, Task, TaskList, TaskStatus, TaskUpdate,
};

pub(crate) const DEPTH: &str = "M Path Depth 2";

#[derive(Default)]
pub(crate) struct FakeApi {
    folders: HashMap<String, Vec<Folder>>,
    lists: RefCell<HashMap<String, Vec<TaskList>>>,
    tasks: RefCell<Vec<Task>>,
    failing_lists: HashSet<String>,
    failing_updates: HashSet<String>,
    updates: RefCell<Vec<(String, TaskUpdate)>>,
    deleted: RefCell<Vec<String>>,
    queries: RefCell<Vec<(String, TaskQuery)>>,
}

impl FakeApi {
    pub fn add_folder(&mut self, space_id: &str, folder: Folder) {
        self.folders
            .entry(space_id.to_string())
            .or_default()
            .push(folder);
    }

    pub fn add_list(&mut self, folder_id: &str, list: TaskList) {
        self.lists
            .get_mut()
            .entry(folder_id.to_string())
            .or_default()
            .push(list);
    }

    pub fn add_task(&mut self, list: &TaskList, mut task: Task) {
        task.list = ListRef {
            id: list.id.clone(),
            name: list.name.clone(),
        };
        self.tasks.get_mut().push(task);
    }

    /// Task listings for `list_id` answer HTTP 500.
    pub fn fail_tasks_for(&mut self, list_id: &str) {
        self.failing_lists.insert(list_id.to_string());
    }

    pub fn fail_update_for(&mut self, task_id: &str) {
        self.failing_updates.insert(task_id.to_string());
    }

    pub fn updates(&self) -> Vec<(String, TaskUpdate)> {
        self.updates.borrow().clone()
    }

    pub fn update_for(&self, task_id: &str) -> Option<TaskUpdate> {
        self.updates
            .borrow()
            .iter()
            .rev()
            .find(|(id, _)| id == task_id)
            .map(|(_, u)| u.clone())
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.borrow().clone()
    }

    pub fn queries(&self) -> Vec<(String, TaskQuery)> {
        self.queries.borrow().clone()
    }
}

fn status_error(code: u32, what: &str) -> ApiError {
    ApiError::Status {
        code,
        url: format!("fake://{what}"),
        body: String::new(),
    }
}

fn is_closed(task: &Task) -> bool {
    task.status.is("complete") || task.status.is("closed")
}

impl TaskApi for FakeApi {
    fn folders(&self, space_id: &str) -> Result<Vec<Folder>, ApiError> {
        self.folders
            .get(space_id)
            .cloned()
            .ok_or_else(|| status_error(404, space_id))
    }

    fn lists(&self, folder_id: &str) -> Result<Vec<TaskList>, ApiError> {
        Ok(self
            .lists
            .borrow()
            .get(folder_id)
            .cloned()
            .unwrap_or_default())
    }

    fn tasks(&self, list_id: &str, query: TaskQuery) -> Result<Vec<Task>, ApiError> {
        self.queries
            .borrow_mut()
            .push((list_id.to_string(), query));
        if self.failing_lists.contains(list_id) {
            return Err(status_error(500, list_id));
        }
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|t| t.list.id == list_id)
            .filter(|t| query.subtasks || !t.has_parent())
            .filter(|t| query.include_closed || !is_closed(t))
            .cloned()
            .collect())
    }

    fn task(&self, task_id: &str) -> Result<Task, ApiError> {
        self.tasks
            .borrow()
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| status_error(404, task_id))
    }

    fn list(&self, list_id: &str) -> Result<TaskList, ApiError> {
        self.lists
            .borrow()
            .values()
            .flatten()
            .find(|l| l.id == list_id)
            .cloned()
            .ok_or_else(|| status_error(404, list_id))
    }

    fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<(), ApiError> {
        if self.failing_updates.contains(task_id) {
            return Err(status_error(400, task_id));
        }
        self.updates
            .borrow_mut()
            .push((task_id.to_string(), update.clone()));
        let mut tasks = self.tasks.borrow_mut();
        if let Some(t) = tasks.iter_mut().find(|t| t.id == task_id) {
            if let Some(parent) = &update.parent {
                t.parent = Some(parent.clone());
            }
            if let Some(status) = &update.status {
                t.status.status = status.clone();
            }
            if let Some(name) = &update.name {
                t.name = name.clone();
            }
        }
        Ok(())
    }

    fn delete_list(&self, list_id: &str) -> Result<(), ApiError> {
        for lists in self.lists.borrow_mut().values_mut() {
            lists.retain(|l| l.id != list_id);
        }
        self.deleted.borrow_mut().push(list_id.to_string());
        Ok(())
    }
}

pub(crate) fn folder(id: &str, name: &str) -> Folder {
    Folder {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub(crate) fn list(id: &str, name: &str, folder_id: &str) -> TaskList {
    TaskList {
        id: id.to_string(),
        name: name.to_string(),
        folder: Some(FolderRef {
            id: folder_id.to_string(),
            name: Some(format!("folder {folder_id}")),
        }),
    }
}

/// Open task, optionally carrying a depth field.
pub(crate) fn task(id: &str, name: &str, depth: Option<u32>) -> Task {
    let custom_fields = depth
        .map(|d| CustomField {
            name: DEPTH.to_string(),
            value: Some(Value::from(d.to_string())),
        })
        .into_iter()
        .collect();
    Task {
        id: id.to_string(),
        name: name.to_string(),
        status: TaskStatus {
            status: "open".to_string(),
        },
        parent: None,
        list: ListRef::default(),
        custom_fields,
    }
}

pub(crate) fn with_field(mut task: Task, name: &str, value: Value) -> Task {
    task.custom_fields.push(CustomField {
        name: name.to_string(),
        value: Some(value),
    });
    task
}

pub(crate) fn child_of(mut task: Task, parent_id: &str) -> Task {
    task.parent = Some(parent_id.to_string());
    task
}

pub(crate) fn with_status(mut task: Task, status: &str) -> Task {
    task.status.status = status.to_string();
    task
}
