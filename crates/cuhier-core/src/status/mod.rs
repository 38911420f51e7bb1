//! Status-propagation pass.
//!
//! Imported tasks carry their original state in `M ...` custom fields. Per
//! list, a first round closes tasks that have a completion date; a second
//! round over the still-open tasks maps project status, project flag, hidden
//! flag, recurrence and star onto native task fields. Failed updates are
//! logged and counted; they never stop the pass.


use crate::api::{ApiError, TaskApi, TaskQuery};
use crate::control::{or_skip, AbortToken, SweepAborted};
use crate::model::{Task, TaskList, TaskUpdate};

pub const DATE_COMPLETED_FIELD: &str = "M Date Completed";
pub const RECURRENCE_FIELD: &str = "M Recurrence";
pub const PROJECT_STATUS_FIELD: &str = "M Project Status";
pub const IS_PROJECT_FIELD: &str = "M Is Project";
pub const HIDE_IN_TODO_FIELD: &str = "M Hide In To Do";
pub const STARRED_FIELD: &str = "M Starred";

pub const STATUS_COMPLETE: &str = "COMPLETE";
pub const STATUS_IN_PROGRESS: &str = "IN PROGRESS";
pub const STATUS_SUSPENDED: &str = "SUSPENDED";
pub const STATUS_REJECTED: &str = "REJECTED";

pub const PROJECT_PREFIX: &str = "[Prj] ";

/// Counters gathered by the status pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusStats {
    pub lists: usize,
    pub tasks_updated: usize,
    pub update_failures: usize,
}

/// First round: close tasks that carry a completion date.
///
/// Recurring tasks keep their status; only the dates are copied.
pub fn completion_update(task: &Task) -> TaskUpdate {
    let mut update = TaskUpdate::default();
    if let Some(done) = task.field(DATE_COMPLETED_FIELD) {
        update.date_closed = Some(done.clone());
        update.date_done = Some(done.clone());
        if !task.status.is(STATUS_COMPLETE) && task.field_nonempty(RECURRENCE_FIELD).is_none() {
            update.status = Some(STATUS_COMPLETE.to_string());
        }
    }
    update
}

/// Second round: map imported flags on an open task onto native fields.
pub fn open_task_update(task: &Task) -> TaskUpdate {
    let mut update = TaskUpdate::default();
    let recurrence = task.field_nonempty(RECURRENCE_FIELD);

    match task.field_text(PROJECT_STATUS_FIELD).as_deref().map(str::trim) {
        Some("Completed") => match &recurrence {
            Some(r) => update.comments = Some(r.clone()),
            None => update.status = Some(STATUS_COMPLETE.to_string()),
        },
        Some("In Progress") => update.status = Some(STATUS_IN_PROGRESS.to_string()),
        Some("Suspended") => update.status = Some(STATUS_SUSPENDED.to_string()),
        _ => {}
    }

    if is_project(task) && !task.name.starts_with(PROJECT_PREFIX.trim_end()) {
        update.name = Some(format!("{PROJECT_PREFIX}{}", task.name));
    }
    if flag_is_yes(task, HIDE_IN_TODO_FIELD) {
        update.status = Some(STATUS_REJECTED.to_string());
    }
    if let Some(r) = recurrence {
        update.comments = Some(r);
    }
    if flag_is_yes(task, STARRED_FIELD) {
        update.priority = Some(1);
    }
    update
}

fn is_project(task: &Task) -> bool {
    matches!(
        task.field_text(IS_PROJECT_FIELD).as_deref().map(str::trim),
        Some("1") | Some("true")
    )
}

fn flag_is_yes(task: &Task, field: &str) -> bool {
    task.field_text(field).as_deref().map(str::trim) == Some("Y")
}

pub struct StatusPass<'a, A> {
    api: &'a A,
    abort: &'a AbortToken,
}

impl<'a, A: TaskApi> StatusPass<'a, A> {
    pub fn new(api: &'a A, abort: &'a AbortToken) -> Self {
        Self { api, abort }
    }

    pub fn run_list(&self, list: &TaskList, stats: &mut StatusStats) -> Result<(), SweepAborted> {
        tracing::info!(
            "processing list {} in folder {}",
            list.name,
            list.folder_name()
        );
        stats.lists += 1;

        let tasks = or_skip(self.api.tasks(&list.id, TaskQuery::all()), || {
            format!("tasks of list {} ({})", list.id, list.name)
        })?;
        if tasks.is_empty() {
            return Ok(());
        }
        for task in &tasks {
            self.abort.check()?;
            self.send(task, completion_update(task), stats)?;
        }

        // Tasks closed above drop out of the open listing.
        let open = or_skip(self.api.tasks(&list.id, TaskQuery::open()), || {
            format!("open tasks of list {} ({})", list.id, list.name)
        })?;
        for task in &open {
            self.abort.check()?;
            self.send(task, open_task_update(task), stats)?;
        }

        tracing::info!("finished updating tasks and subtasks in list {}", list.name);
        Ok(())
    }

    fn send(&self, task: &Task, update: TaskUpdate, stats: &mut StatusStats) -> Result<(), SweepAborted> {
        if update.is_empty() {
            return Ok(());
        }
        match self.api.update_task(&task.id, &update) {
            Ok(()) => {
                tracing::debug!("updated task {} ({})", task.id, task.name);
                stats.tasks_updated += 1;
            }
            Err(ApiError::Aborted) => return Err(SweepAborted),
            Err(e) => {
                tracing::warn!("failed to update task {} ({}): {}", task.id, task.name, e);
                stats.update_failures += 1;
            }
        }
        Ok(())
    }
}
